pub mod auth;
pub mod cache;
pub mod coerce;
pub mod jwt;
