pub mod prelude;

pub mod league_members;
pub mod leagues;
pub mod parlays;
pub mod users;
