use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::constants::config::AppConfig;
use crate::routes;
use crate::services::odds::OddsClient;

/// Shared handles registered on every worker. Built once so all workers see
/// the same odds cache.
#[derive(Clone)]
pub struct AppState {
    pub db: web::Data<DatabaseConnection>,
    pub config: web::Data<AppConfig>,
    pub odds: web::Data<OddsClient>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let odds = OddsClient::new(&config);
        Self::with_odds_client(db, config, odds)
    }

    pub fn with_odds_client(db: DatabaseConnection, config: AppConfig, odds: OddsClient) -> Self {
        Self {
            db: web::Data::new(db),
            config: web::Data::new(config),
            odds: web::Data::new(odds),
        }
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.db.clone())
            .app_data(self.config.clone())
            .app_data(self.odds.clone())
            .service(routes::api::configure_routes());
    }
}
