use chrono::NaiveDateTime;
use entity::{parlays, users};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a whole ticket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParlayResult {
    #[default]
    Pending,
    Won,
    Lost,
}

impl ParlayResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParlayResult::Pending => "pending",
            ParlayResult::Won => "won",
            ParlayResult::Lost => "lost",
        }
    }
}

impl FromStr for ParlayResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParlayResult::Pending),
            "won" => Ok(ParlayResult::Won),
            "lost" => Ok(ParlayResult::Lost),
            other => Err(format!("Unknown parlay result: {}", other)),
        }
    }
}

impl fmt::Display for ParlayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-leg outcome. `Push` is a leg that neither won nor lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickResult {
    #[default]
    Pending,
    Won,
    Lost,
    Push,
}

/// A normalized leg as persisted in `parlays.picks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub team: String,
    #[serde(rename = "type")]
    pub bet_type: String,
    pub side: Option<String>,
    pub line: Option<f64>,
    /// American odds for this leg.
    pub odds: f64,
    #[serde(default)]
    pub matchup: Option<String>,
    #[serde(default)]
    pub result: PickResult,
}

/// A leg exactly as the client sent it; every field is coerced on write.
#[derive(Deserialize, Debug, Default)]
pub struct PickInput {
    pub team: Option<Value>,
    #[serde(rename = "type")]
    pub bet_type: Option<Value>,
    pub side: Option<Value>,
    pub line: Option<Value>,
    pub odds: Option<Value>,
    pub matchup: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmitParlayRequest {
    pub league_id: Option<Value>,
    pub week: Option<Value>,
    pub picks: Option<Value>,
    pub odds: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettleParlayRequest {
    pub league_id: Option<Value>,
    pub target_user_id: Option<Value>,
    pub week: Option<Value>,
    pub result: Option<Value>,
    pub legs_won: Option<Value>,
    pub legs_lost: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmissionStatus {
    pub submitted: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParlayResponse {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub league_id: i32,
    pub week: i32,
    pub picks: Vec<Pick>,
    pub odds: f64,
    pub result: String,
    pub legs_won: i32,
    pub legs_lost: i32,
    pub submitted_at: NaiveDateTime,
}

impl From<(parlays::Model, Option<users::Model>)> for ParlayResponse {
    fn from((parlay, user): (parlays::Model, Option<users::Model>)) -> Self {
        let picks = serde_json::from_value(parlay.picks).unwrap_or_else(|e| {
            log::warn!("Parlay {} has unreadable picks: {}", parlay.id, e);
            Vec::new()
        });
        Self {
            id: parlay.id,
            user_id: parlay.user_id,
            username: user.map(|u| u.username).unwrap_or_default(),
            league_id: parlay.league_id,
            week: parlay.week,
            picks,
            odds: parlay.odds,
            result: parlay.result,
            legs_won: parlay.legs_won,
            legs_lost: parlay.legs_lost,
            submitted_at: parlay.submitted_at,
        }
    }
}
