use crate::handlers::odds_handler::get_odds;
use actix_web::web;

pub fn configure_odds_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/odds", web::get().to(get_odds));
}
