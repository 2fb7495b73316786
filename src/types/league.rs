use chrono::NaiveDateTime;
use entity::{leagues, users};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueType {
    /// Virtual-currency balance scoring.
    Classic,
    /// Explicit per-win and bonus point awards.
    Points,
}

impl LeagueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueType::Classic => "classic",
            LeagueType::Points => "points",
        }
    }
}

impl FromStr for LeagueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(LeagueType::Classic),
            "points" => Ok(LeagueType::Points),
            other => Err(format!("Unknown league type: {}", other)),
        }
    }
}

impl fmt::Display for LeagueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated scoring settings. Fields that do not belong to `league_type` are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    pub league_type: LeagueType,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub starting_bucs: Option<Decimal>,
    pub points_per_win: Option<f64>,
    pub bonus_week: Option<f64>,
    pub bonus_season: Option<f64>,
    pub min_total_odds: f64,
    pub min_leg_odds: f64,
    pub num_legs: i32,
    pub submission_deadline: String,
}

impl From<&leagues::Model> for LeagueSettings {
    fn from(league: &leagues::Model) -> Self {
        Self {
            league_type: league.league_type.parse().unwrap_or(LeagueType::Classic),
            starting_bucs: league.starting_bucs,
            points_per_win: league.points_per_win,
            bonus_week: league.bonus_week,
            bonus_season: league.bonus_season,
            min_total_odds: league.min_total_odds,
            min_leg_odds: league.min_leg_odds,
            num_legs: league.num_legs,
            submission_deadline: league.submission_deadline.clone(),
        }
    }
}

/// Settings as sent by a client, before validation.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettingsInput {
    pub league_type: Option<Value>,
    pub starting_bucs: Option<Value>,
    pub points_per_win: Option<Value>,
    pub bonus_week: Option<Value>,
    pub bonus_season: Option<Value>,
    pub min_total_odds: Option<Value>,
    pub min_leg_odds: Option<Value>,
    pub num_legs: Option<Value>,
    pub submission_deadline: Option<Value>,
}

impl LeagueSettingsInput {
    /// Settings every new league starts with.
    pub fn classic_defaults() -> Self {
        Self {
            league_type: Some(json!("classic")),
            starting_bucs: Some(json!(5000)),
            min_total_odds: Some(json!(500)),
            min_leg_odds: Some(json!(-150)),
            num_legs: Some(json!(3)),
            submission_deadline: Some(json!("Sunday 12:00 PM")),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueRequest {
    pub league_name: Option<String>,
    pub passkey: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeagueSettingsRequest {
    pub league_id: Option<Value>,
    #[serde(flatten)]
    pub settings: LeagueSettingsInput,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JoinLeagueRequest {
    pub league_id: Option<Value>,
    pub passkey: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchLeaguesQuery {
    pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserLeaguesQuery {
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueResponse {
    pub message: String,
    pub league_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreatorSummary {
    pub id: i32,
    pub username: String,
}

impl From<users::Model> for CreatorSummary {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub id: i32,
    pub name: String,
    pub creator: Option<CreatorSummary>,
    pub settings: LeagueSettings,
    pub members: Vec<i32>,
    pub created_at: NaiveDateTime,
}

impl LeagueResponse {
    pub fn new(
        league: leagues::Model,
        creator: Option<CreatorSummary>,
        members: Vec<i32>,
    ) -> Self {
        Self {
            id: league.id,
            settings: LeagueSettings::from(&league),
            name: league.name,
            creator,
            members,
            created_at: league.created_at,
        }
    }
}
