use actix_web::web;
use crate::handlers::parlay_handler;
use crate::middleware::auth::AuthMiddleware;

pub fn configure_parlay_routes() -> actix_web::Scope {
    web::scope("/parlay")
        .route("/submit", web::post().to(parlay_handler::submit_parlay).wrap(AuthMiddleware))
        .route(
            "/week/{league_id}/{week}",
            web::get().to(parlay_handler::get_week_parlays).wrap(AuthMiddleware),
        )
        .route(
            "/mine/{league_id}/{week}",
            web::get().to(parlay_handler::get_my_submission).wrap(AuthMiddleware),
        )
        .route("/settle", web::post().to(parlay_handler::settle_parlay).wrap(AuthMiddleware))
}
