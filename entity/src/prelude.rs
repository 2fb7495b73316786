pub use super::league_members::Entity as LeagueMembers;
pub use super::leagues::Entity as Leagues;
pub use super::parlays::Entity as Parlays;
pub use super::users::Entity as Users;
