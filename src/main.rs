use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use parlay_league::constants::config::AppConfig;
use parlay_league::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().expect("Invalid server configuration");

    // Database connection
    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");

    let server_address = config.server_address.clone();
    if config.odds_api_key.is_none() {
        log::warn!("ODDS_API_KEY is not set; /api/odds will answer 500");
    }
    log::info!("Starting Parlay League API server");
    log::info!("Database connected and migrated");
    log::info!("Server will be available at http://{}", server_address);

    let state = AppState::new(db, config);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(&server_address)?
    .run()
    .await
}
