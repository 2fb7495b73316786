use actix_web::{error, web, HttpRequest};

use crate::error::ApiError;
use crate::handlers::health::{health_check, index};

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid(format!("Invalid JSON body: {}", err)).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid(format!("Invalid query string: {}", err)).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid(format!("Invalid path: {}", err)).into()
}

pub fn configure_routes() -> actix_web::Scope {
    web::scope("")
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .configure(crate::routes::auth::configure_auth_routes)
        .configure(crate::routes::league::configure_root_league_routes)
        .service(
            web::scope("/api")
                .service(crate::routes::parlay::configure_parlay_routes())
                .service(crate::routes::league::configure_league_routes())
                .service(crate::routes::league::configure_leagues_routes())
                .configure(crate::routes::league::configure_api_league_routes)
                .configure(crate::routes::odds::configure_odds_routes),
        )
}
