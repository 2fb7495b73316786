use entity::leagues;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::parlay_store;
use crate::types::parlay::{Pick, PickInput, SubmitParlayRequest};
use crate::utils::coerce;

/// A submission whose fields passed boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParlaySubmission {
    pub league_id: i32,
    pub week: i32,
    pub picks: Vec<Pick>,
    pub total_odds: f64,
}

impl TryFrom<SubmitParlayRequest> for ParlaySubmission {
    type Error = ApiError;

    fn try_from(req: SubmitParlayRequest) -> Result<Self, Self::Error> {
        let league_id = coerce::id(req.league_id.as_ref())
            .ok_or_else(|| ApiError::invalid("leagueId is required"))?;

        let week = coerce::present(req.week.as_ref())
            .and_then(coerce::integer)
            .ok_or_else(|| ApiError::invalid("week must be an integer"))?;

        let raw_picks = match req.picks {
            Some(Value::Array(items)) if !items.is_empty() => items,
            Some(Value::Array(_)) => {
                return Err(ApiError::invalid("picks must contain at least one pick"))
            }
            _ => return Err(ApiError::invalid("picks must be an array")),
        };

        let inputs = raw_picks
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<PickInput>(item)
                    .map_err(|_| ApiError::invalid(format!("picks[{}] must be an object", i)))
            })
            .collect::<ApiResult<Vec<_>>>()?;
        let picks = parlay_store::normalize_picks(&inputs)?;

        let total_odds = coerce::present(req.odds.as_ref())
            .and_then(coerce::number)
            .ok_or_else(|| ApiError::invalid("odds must be a finite number"))?;

        Ok(Self {
            league_id,
            week,
            picks,
            total_odds,
        })
    }
}

/// Store the acting user's parlay for the week, replacing any earlier
/// submission for the same league and week.
pub async fn submit_parlay<C: ConnectionTrait>(
    db: &C,
    user: &AuthenticatedUser,
    submission: ParlaySubmission,
) -> ApiResult<i32> {
    if leagues::Entity::find_by_id(submission.league_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("League not found."));
    }

    let parlay_id = parlay_store::upsert_parlay(
        db,
        user.id,
        submission.league_id,
        submission.week,
        &submission.picks,
        submission.total_odds,
    )
    .await?;

    log::info!(
        "User {} submitted parlay {} for league {} week {} ({} legs @ {})",
        user.id,
        parlay_id,
        submission.league_id,
        submission.week,
        submission.picks.len(),
        submission.total_odds
    );

    Ok(parlay_id)
}
