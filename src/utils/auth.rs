use entity::leagues;
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;

/// Capability gate for creator-only league operations. Resolves the league
/// and fails with `NotFound` or `Forbidden` before any payload is inspected.
pub async fn require_league_creator<C: ConnectionTrait>(
    db: &C,
    league_id: i32,
    user: &AuthenticatedUser,
    action: &str,
) -> ApiResult<leagues::Model> {
    let league = leagues::Entity::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("League not found."))?;

    if league.creator_id != user.id {
        log::warn!(
            "User {} attempted to {} for league {} without being its creator",
            user.id,
            action,
            league_id
        );
        return Err(ApiError::forbidden(format!(
            "Not authorized to {} for this league.",
            action
        )));
    }

    Ok(league)
}
