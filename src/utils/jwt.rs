use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, errors::ErrorKind, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::constants::config::AppConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}

pub fn create_jwt_token(user_id: i32, config: &AppConfig) -> Result<String, JwtError> {
    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::hours(config.jwt_expiry_hours)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
}

pub fn validate_jwt_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Validates the token and returns the user id carried in `sub`.
pub fn verify_jwt_token(token: &str, secret: &str) -> Result<i32, JwtError> {
    let claims = validate_jwt_token(token, secret)?;
    claims
        .sub
        .parse::<i32>()
        .map_err(|_| JwtError::from(ErrorKind::InvalidSubject))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_the_same_user() {
        let config = AppConfig::new("sqlite::memory:", "unit-secret");
        let token = create_jwt_token(42, &config).unwrap();
        assert_eq!(verify_jwt_token(&token, "unit-secret").unwrap(), 42);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let config = AppConfig::new("sqlite::memory:", "unit-secret");
        let token = create_jwt_token(42, &config).unwrap();
        assert!(verify_jwt_token(&token, "other-secret").is_err());
    }
}
