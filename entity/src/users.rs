use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Default league affiliation, set when the user creates or joins a league.
    pub league_name: Option<String>,
    pub passkey: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parlays::Entity")]
    Parlays,
    #[sea_orm(has_many = "super::league_members::Entity")]
    LeagueMembers,
}

impl Related<super::parlays::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parlays.def()
    }
}

impl Related<super::league_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeagueMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
