use sea_orm::ConnectionTrait;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::parlay_store;
use crate::types::parlay::{ParlayResult, SettleParlayRequest};
use crate::utils::{auth::require_league_creator, coerce};

/// Record the outcome of a member's parlay. Only the league creator may settle.
///
/// The creator check runs before the payload is validated, so a non-creator
/// always receives `Forbidden`. Re-settling is allowed and overwrites the
/// previous result; leg counts that are absent or not non-negative integers
/// keep their stored values.
pub async fn settle_parlay<C: ConnectionTrait>(
    db: &C,
    user: &AuthenticatedUser,
    req: SettleParlayRequest,
) -> ApiResult<i32> {
    let league_id = coerce::id(req.league_id.as_ref())
        .ok_or_else(|| ApiError::invalid("leagueId is required"))?;

    require_league_creator(db, league_id, user, "settle parlays").await?;

    let target_user_id = coerce::id(req.target_user_id.as_ref())
        .ok_or_else(|| ApiError::invalid("targetUserId is required"))?;
    let week = coerce::present(req.week.as_ref())
        .and_then(coerce::integer)
        .ok_or_else(|| ApiError::invalid("week must be an integer"))?;
    let result = req
        .result
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<ParlayResult>().ok())
        .ok_or_else(|| ApiError::invalid("result must be one of pending, won, lost"))?;

    let legs_won = req.legs_won.as_ref().and_then(coerce::count);
    let legs_lost = req.legs_lost.as_ref().and_then(coerce::count);

    let parlay = parlay_store::find_parlay(db, target_user_id, league_id, week)
        .await?
        .ok_or_else(|| ApiError::not_found("Parlay not found for that user/week."))?;

    parlay_store::update_result(db, parlay.id, result, legs_won, legs_lost).await?;

    log::info!(
        "League {} creator {} settled parlay {} (user {}, week {}) as {}",
        league_id,
        user.id,
        parlay.id,
        target_user_id,
        week,
        result
    );

    Ok(parlay.id)
}
