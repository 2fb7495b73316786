use serde::{Deserialize, Serialize};

/// One user's season line. Derived on every request, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub username: String,
    pub legs_won: i64,
    pub legs_lost: i64,
    pub parlay_wins: u32,
    pub parlay_losses: u32,
    pub points: u32,
}

impl StandingsRow {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            legs_won: 0,
            legs_lost: 0,
            parlay_wins: 0,
            parlay_losses: 0,
            points: 0,
        }
    }
}
