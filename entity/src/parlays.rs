use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One weekly ticket. `(user_id, league_id, week)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parlays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub league_id: i32,
    pub week: i32,
    /// Normalized legs, stored as a JSON array.
    #[sea_orm(column_type = "JsonBinary")]
    pub picks: Json,
    /// Total decimal odds of the combined ticket.
    pub odds: f64,
    pub result: String,
    pub legs_won: i32,
    pub legs_lost: i32,
    pub submitted_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::leagues::Entity",
        from = "Column::LeagueId",
        to = "super::leagues::Column::Id"
    )]
    League,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::leagues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::League.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
