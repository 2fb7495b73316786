use actix_web::web;
use crate::handlers::league_handler;
use crate::middleware::auth::AuthMiddleware;

/// Routes mounted outside `/api`.
pub fn configure_root_league_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/create-league",
        web::post().to(league_handler::create_league).wrap(AuthMiddleware),
    )
    .route("/league/{league_id}", web::get().to(league_handler::get_league));
}

pub fn configure_api_league_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/league-settings",
        web::post().to(league_handler::update_league_settings).wrap(AuthMiddleware),
    )
    .route("/user-leagues", web::get().to(league_handler::get_user_leagues));
}

pub fn configure_league_routes() -> actix_web::Scope {
    web::scope("/league")
        .route("/{league_id}/stats", web::get().to(league_handler::get_league_stats))
}

pub fn configure_leagues_routes() -> actix_web::Scope {
    web::scope("/leagues")
        .route("/join", web::post().to(league_handler::join_league).wrap(AuthMiddleware))
        .route("/search", web::get().to(league_handler::search_leagues))
}
