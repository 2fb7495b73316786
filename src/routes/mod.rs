pub mod api;
pub mod auth;
pub mod league;
pub mod odds;
pub mod parlay;
