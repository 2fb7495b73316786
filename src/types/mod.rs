pub mod auth;
pub mod league;
pub mod odds;
pub mod parlay;
pub mod response;
pub mod standings;
