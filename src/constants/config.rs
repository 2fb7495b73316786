use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 1;
pub const DEFAULT_ODDS_CACHE_TTL_SECS: u64 = 5 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at startup and shared as `web::Data`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_address: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub odds_api_key: Option<String>,
    pub odds_api_base_url: String,
    pub odds_cache_ttl: Duration,
}

impl AppConfig {
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            odds_api_key: None,
            odds_api_base_url: DEFAULT_ODDS_API_BASE_URL.to_string(),
            odds_cache_ttl: Duration::from_secs(DEFAULT_ODDS_CACHE_TTL_SECS),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = get_database_url()?;
        let jwt_secret = get_jwt_secret()?;

        let mut config = Self::new(database_url, jwt_secret);
        config.server_address = get_server_address();
        config.jwt_expiry_hours = parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?;
        config.bcrypt_cost = parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        config.odds_api_key = env::var("ODDS_API_KEY").ok().filter(|k| !k.is_empty());
        config.odds_api_base_url = env::var("ODDS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ODDS_API_BASE_URL.to_string());
        config.odds_cache_ttl = Duration::from_secs(parse_var(
            "ODDS_CACHE_TTL_SECS",
            DEFAULT_ODDS_CACHE_TTL_SECS,
        )?);

        Ok(config)
    }
}

pub fn get_database_url() -> Result<String, ConfigError> {
    env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))
}

pub fn get_jwt_secret() -> Result<String, ConfigError> {
    env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing("JWT_SECRET"))
}

pub fn get_server_address() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
