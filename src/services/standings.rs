//! Season standings for a league, recomputed from every stored parlay.
//!
//! Scoring: a won parlay is worth [`POINTS_PER_WIN`]. Within each week the
//! winning parlays carrying that week's highest total odds each earn
//! [`WEEKLY_BONUS`], and the winners carrying the highest total odds of the
//! whole season each earn [`SEASON_BONUS`]. Ties all qualify.

use sea_orm::ConnectionTrait;
use std::collections::{BTreeMap, HashMap};

use crate::error::ApiResult;
use crate::services::parlay_store;
use crate::types::parlay::ParlayResult;
use crate::types::standings::StandingsRow;

pub const POINTS_PER_WIN: u32 = 1;
pub const WEEKLY_BONUS: u32 = 2;
pub const SEASON_BONUS: u32 = 5;

/// The slice of a parlay the scoring rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredParlay {
    pub user_id: i32,
    pub username: String,
    pub week: i32,
    pub result: ParlayResult,
    pub odds: f64,
    pub legs_won: i32,
    pub legs_lost: i32,
}

/// Non-finite odds count as zero, both when finding a maximum and when
/// comparing against it.
fn bonus_odds(odds: f64) -> f64 {
    if odds.is_finite() {
        odds
    } else {
        0.0
    }
}

/// Fold parlays, in encounter order, into standings sorted by points.
/// Users with equal points keep the order in which they were first seen.
pub fn compute_standings(parlays: &[ScoredParlay]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::new();
    let mut row_of: HashMap<i32, usize> = HashMap::new();

    for parlay in parlays {
        let idx = *row_of.entry(parlay.user_id).or_insert_with(|| {
            rows.push(StandingsRow::new(parlay.username.clone()));
            rows.len() - 1
        });
        let row = &mut rows[idx];

        row.legs_won += i64::from(parlay.legs_won);
        row.legs_lost += i64::from(parlay.legs_lost);

        match parlay.result {
            ParlayResult::Won => {
                row.parlay_wins += 1;
                row.points += POINTS_PER_WIN;
            }
            ParlayResult::Lost => row.parlay_losses += 1,
            ParlayResult::Pending => {}
        }
    }

    let winners: Vec<&ScoredParlay> = parlays
        .iter()
        .filter(|p| p.result == ParlayResult::Won)
        .collect();

    let mut winners_by_week: BTreeMap<i32, Vec<&ScoredParlay>> = BTreeMap::new();
    for parlay in &winners {
        winners_by_week.entry(parlay.week).or_default().push(parlay);
    }

    for week_winners in winners_by_week.values() {
        award_longest_odds(&mut rows, &row_of, week_winners, WEEKLY_BONUS);
    }
    award_longest_odds(&mut rows, &row_of, &winners, SEASON_BONUS);

    // Vec::sort_by is stable.
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

fn award_longest_odds(
    rows: &mut [StandingsRow],
    row_of: &HashMap<i32, usize>,
    winners: &[&ScoredParlay],
    bonus: u32,
) {
    if winners.is_empty() {
        return;
    }

    let max_odds = winners
        .iter()
        .map(|p| bonus_odds(p.odds))
        .fold(f64::NEG_INFINITY, f64::max);

    for parlay in winners.iter().filter(|p| bonus_odds(p.odds) == max_odds) {
        if let Some(&idx) = row_of.get(&parlay.user_id) {
            rows[idx].points += bonus;
        }
    }
}

/// Load every parlay of the league and score it. No caching: each call is a
/// full scan.
pub async fn compute_league_standings<C: ConnectionTrait>(
    db: &C,
    league_id: i32,
) -> ApiResult<Vec<StandingsRow>> {
    let parlays = parlay_store::find_parlays_by_league(db, league_id).await?;

    let scored: Vec<ScoredParlay> = parlays
        .into_iter()
        .map(|(parlay, owner)| {
            let result = parlay.result.parse().unwrap_or_else(|_| {
                log::warn!(
                    "Parlay {} has unknown result '{}', scoring as pending",
                    parlay.id,
                    parlay.result
                );
                ParlayResult::Pending
            });
            ScoredParlay {
                user_id: parlay.user_id,
                username: owner.map(|u| u.username).unwrap_or_default(),
                week: parlay.week,
                result,
                odds: parlay.odds,
                legs_won: parlay.legs_won,
                legs_lost: parlay.legs_lost,
            }
        })
        .collect();

    log::debug!(
        "Computing standings for league {} from {} parlays",
        league_id,
        scored.len()
    );

    Ok(compute_standings(&scored))
}
