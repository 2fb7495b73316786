pub mod auth_handler;
pub mod health;
pub mod league_handler;
pub mod odds_handler;
pub mod parlay_handler;
