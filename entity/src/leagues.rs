use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leagues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Lowercased `name`; carries the case-insensitive uniqueness constraint.
    #[sea_orm(unique)]
    pub name_key: String,
    #[serde(skip_serializing)]
    pub passkey: String,
    pub creator_id: i32,
    pub league_type: String,
    pub starting_bucs: Option<Decimal>,
    pub points_per_win: Option<f64>,
    pub bonus_week: Option<f64>,
    pub bonus_season: Option<f64>,
    pub min_total_odds: f64,
    pub min_leg_odds: f64,
    pub num_legs: i32,
    pub submission_deadline: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatorId",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::league_members::Entity")]
    LeagueMembers,
    #[sea_orm(has_many = "super::parlays::Entity")]
    Parlays,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::league_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeagueMembers.def()
    }
}

impl Related<super::parlays::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parlays.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
