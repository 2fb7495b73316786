//! Persistence for weekly parlays, one row per `(user, league, week)`.

use chrono::Utc;
use entity::{parlays, users};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::types::parlay::{ParlayResult, Pick, PickInput, PickResult};
use crate::utils::coerce;

/// A parlay together with its owner's username.
pub type ParlayWithOwner = (parlays::Model, Option<users::Model>);

/// Coerce every leg of a client payload into a [`Pick`].
///
/// `team`/`type` default to `""`, `side` and `matchup` become string-or-null,
/// `line` becomes number-or-null and `odds` must be numeric.
pub fn normalize_picks(picks: &[PickInput]) -> ApiResult<Vec<Pick>> {
    picks
        .iter()
        .enumerate()
        .map(|(i, pick)| normalize_pick(i, pick))
        .collect()
}

fn normalize_pick(index: usize, pick: &PickInput) -> ApiResult<Pick> {
    let text = |field: &str, value: Option<&Value>| {
        coerce::optional_string(value)
            .map_err(|_| ApiError::invalid(format!("picks[{}].{} must be a string", index, field)))
    };

    let odds = pick
        .odds
        .as_ref()
        .and_then(coerce::number)
        .ok_or_else(|| ApiError::invalid(format!("picks[{}].odds must be a number", index)))?;

    let line = match coerce::present(pick.line.as_ref()) {
        None => None,
        Some(value) => Some(coerce::number(value).ok_or_else(|| {
            ApiError::invalid(format!("picks[{}].line must be a number or null", index))
        })?),
    };

    Ok(Pick {
        team: text("team", pick.team.as_ref())?.unwrap_or_default(),
        bet_type: text("type", pick.bet_type.as_ref())?.unwrap_or_default(),
        side: text("side", pick.side.as_ref())?,
        line,
        odds,
        matchup: text("matchup", pick.matchup.as_ref())?,
        result: PickResult::Pending,
    })
}

/// Insert the parlay or, when the key already exists, overwrite its picks,
/// odds and submission time in a single statement. Result and leg counts
/// are left as they were.
pub async fn upsert_parlay<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    league_id: i32,
    week: i32,
    picks: &[Pick],
    total_odds: f64,
) -> ApiResult<i32> {
    let picks = serde_json::to_value(picks)
        .map_err(|e| ApiError::Internal(format!("Failed to encode picks: {}", e)))?;

    let row = parlays::ActiveModel {
        user_id: Set(user_id),
        league_id: Set(league_id),
        week: Set(week),
        picks: Set(picks),
        odds: Set(total_odds),
        result: Set(ParlayResult::Pending.as_str().to_string()),
        legs_won: Set(0),
        legs_lost: Set(0),
        submitted_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    parlays::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                parlays::Column::UserId,
                parlays::Column::LeagueId,
                parlays::Column::Week,
            ])
            .update_columns([
                parlays::Column::Picks,
                parlays::Column::Odds,
                parlays::Column::SubmittedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    find_parlay(db, user_id, league_id, week)
        .await?
        .map(|p| p.id)
        .ok_or_else(|| ApiError::Internal("Upserted parlay could not be read back".to_string()))
}

pub async fn find_parlay<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    league_id: i32,
    week: i32,
) -> ApiResult<Option<parlays::Model>> {
    let parlay = parlays::Entity::find()
        .filter(parlays::Column::UserId.eq(user_id))
        .filter(parlays::Column::LeagueId.eq(league_id))
        .filter(parlays::Column::Week.eq(week))
        .one(db)
        .await?;
    Ok(parlay)
}

/// Every parlay in the league, in submission-insertion order.
pub async fn find_parlays_by_league<C: ConnectionTrait>(
    db: &C,
    league_id: i32,
) -> ApiResult<Vec<ParlayWithOwner>> {
    let rows = parlays::Entity::find()
        .filter(parlays::Column::LeagueId.eq(league_id))
        .find_also_related(users::Entity)
        .order_by_asc(parlays::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find_parlays_by_league_and_week<C: ConnectionTrait>(
    db: &C,
    league_id: i32,
    week: i32,
) -> ApiResult<Vec<ParlayWithOwner>> {
    let rows = parlays::Entity::find()
        .filter(parlays::Column::LeagueId.eq(league_id))
        .filter(parlays::Column::Week.eq(week))
        .find_also_related(users::Entity)
        .order_by_asc(parlays::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Overwrite the result; leg counts only when supplied.
pub async fn update_result<C: ConnectionTrait>(
    db: &C,
    parlay_id: i32,
    result: ParlayResult,
    legs_won: Option<i32>,
    legs_lost: Option<i32>,
) -> ApiResult<()> {
    let mut update = parlays::Entity::update_many()
        .col_expr(parlays::Column::Result, Expr::value(result.as_str()))
        .filter(parlays::Column::Id.eq(parlay_id));

    if let Some(won) = legs_won {
        update = update.col_expr(parlays::Column::LegsWon, Expr::value(won));
    }
    if let Some(lost) = legs_lost {
        update = update.col_expr(parlays::Column::LegsLost, Expr::value(lost));
    }

    let outcome = update.exec(db).await?;
    if outcome.rows_affected == 0 {
        return Err(ApiError::not_found("Parlay not found."));
    }
    Ok(())
}
