pub use sea_orm_migration::prelude::*;

mod m20240101_000000_create_users_table;
mod m20250901_000000_create_leagues_table;
mod m20250901_000100_create_league_members_table;
mod m20250901_000200_create_parlays_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000000_create_users_table::Migration),
            Box::new(m20250901_000000_create_leagues_table::Migration),
            Box::new(m20250901_000100_create_league_members_table::Migration),
            Box::new(m20250901_000200_create_parlays_table::Migration),
        ]
    }
}
