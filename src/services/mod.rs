pub mod account;
pub mod league;
pub mod odds;
pub mod parlay_store;
pub mod settlement;
pub mod standings;
pub mod submission;
