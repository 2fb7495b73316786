use chrono::Utc;
use entity::{league_members, leagues, users};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use sea_orm::{
    sea_query::{LikeExpr, OnConflict}, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::account::find_user_by_username;
use crate::types::league::{
    CreateLeagueRequest, CreatorSummary, JoinLeagueRequest, LeagueResponse, LeagueSettings,
    LeagueSettingsInput, LeagueType, UpdateLeagueSettingsRequest,
};
use crate::utils::{auth::require_league_creator, coerce};

/// Strict JSON number; numeric strings do not count as settings values.
fn json_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

/// Check scoring settings and return every violated rule.
pub fn validate_settings(input: &LeagueSettingsInput) -> Result<LeagueSettings, Vec<String>> {
    let mut errors = Vec::new();

    let league_type = input
        .league_type
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<LeagueType>().ok());
    if league_type.is_none() {
        errors.push("Invalid league type".to_string());
    }

    let starting_bucs = json_number(input.starting_bucs.as_ref());
    let points_per_win = json_number(input.points_per_win.as_ref());
    let bonus_week = json_number(input.bonus_week.as_ref());
    let bonus_season = json_number(input.bonus_season.as_ref());

    match league_type {
        Some(LeagueType::Classic) if starting_bucs.is_none() => {
            errors.push("Classic leagues must include startingBucs (number)".to_string());
        }
        Some(LeagueType::Points) => {
            if points_per_win.is_none() {
                errors.push("Points leagues must include pointsPerWin".to_string());
            }
            if bonus_week.is_none() {
                errors.push("Points leagues must include bonusWeek".to_string());
            }
            if bonus_season.is_none() {
                errors.push("Points leagues must include bonusSeason".to_string());
            }
        }
        _ => {}
    }

    let min_total_odds = json_number(input.min_total_odds.as_ref());
    if min_total_odds.is_none() {
        errors.push("Missing or invalid minTotalOdds".to_string());
    }
    let min_leg_odds = json_number(input.min_leg_odds.as_ref());
    if min_leg_odds.is_none() {
        errors.push("Missing or invalid minLegOdds".to_string());
    }
    let num_legs = input
        .num_legs
        .as_ref()
        .filter(|v| v.is_number())
        .and_then(coerce::integer);
    if num_legs.is_none() {
        errors.push("Missing or invalid numLegs".to_string());
    }
    let submission_deadline = input
        .submission_deadline
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if submission_deadline.is_none() {
        errors.push("Missing or invalid submissionDeadline".to_string());
    }

    match (league_type, min_total_odds, min_leg_odds, num_legs, submission_deadline) {
        (Some(league_type), Some(min_total_odds), Some(min_leg_odds), Some(num_legs), Some(deadline))
            if errors.is_empty() =>
        {
            let classic = league_type == LeagueType::Classic;
            let points = league_type == LeagueType::Points;
            Ok(LeagueSettings {
                league_type,
                starting_bucs: starting_bucs
                    .filter(|_| classic)
                    .and_then(Decimal::from_f64),
                points_per_win: points_per_win.filter(|_| points),
                bonus_week: bonus_week.filter(|_| points),
                bonus_season: bonus_season.filter(|_| points),
                min_total_odds,
                min_leg_odds,
                num_legs,
                submission_deadline: deadline.to_string(),
            })
        }
        _ => Err(errors),
    }
}

fn apply_settings(league: &mut leagues::ActiveModel, settings: LeagueSettings) {
    league.league_type = Set(settings.league_type.as_str().to_string());
    league.starting_bucs = Set(settings.starting_bucs);
    league.points_per_win = Set(settings.points_per_win);
    league.bonus_week = Set(settings.bonus_week);
    league.bonus_season = Set(settings.bonus_season);
    league.min_total_odds = Set(settings.min_total_odds);
    league.min_leg_odds = Set(settings.min_leg_odds);
    league.num_legs = Set(settings.num_legs);
    league.submission_deadline = Set(settings.submission_deadline);
}

/// Record the league as the user's default affiliation.
async fn set_affiliation<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    league: &leagues::Model,
) -> ApiResult<()> {
    users::Entity::update_many()
        .col_expr(
            users::Column::LeagueName,
            sea_orm::sea_query::Expr::value(league.name.clone()),
        )
        .col_expr(
            users::Column::Passkey,
            sea_orm::sea_query::Expr::value(league.passkey.clone()),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn create_league<C>(
    db: &C,
    user: &AuthenticatedUser,
    req: CreateLeagueRequest,
) -> ApiResult<i32>
where
    C: ConnectionTrait + TransactionTrait,
{
    let name = req.league_name.as_deref().map(str::trim).unwrap_or_default();
    let passkey = req.passkey.as_deref().unwrap_or_default();
    if name.is_empty() || passkey.is_empty() {
        return Err(ApiError::invalid("League name and passkey are required"));
    }

    let name_key = name.to_lowercase();
    let existing = leagues::Entity::find()
        .filter(leagues::Column::NameKey.eq(name_key.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "A league with this name already exists.".to_string(),
        ));
    }

    let settings = validate_settings(&LeagueSettingsInput::classic_defaults())
        .map_err(|errors| ApiError::invalid(errors.join(", ")))?;

    let mut new_league = leagues::ActiveModel {
        name: Set(name.to_string()),
        name_key: Set(name_key),
        passkey: Set(passkey.to_string()),
        creator_id: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    apply_settings(&mut new_league, settings);

    let txn = db.begin().await?;
    let league = new_league
        .insert(&txn)
        .await
        .map_err(|e| ApiError::from_insert(e, "A league with this name already exists."))?;
    set_affiliation(&txn, user.id, &league).await?;
    txn.commit().await?;

    log::info!("User {} created league {} ({})", user.id, league.id, league.name);
    Ok(league.id)
}

pub async fn update_settings<C: ConnectionTrait>(
    db: &C,
    user: &AuthenticatedUser,
    req: UpdateLeagueSettingsRequest,
) -> ApiResult<()> {
    let settings_input = req.settings;
    let required = [
        &settings_input.league_type,
        &settings_input.min_total_odds,
        &settings_input.min_leg_odds,
        &settings_input.num_legs,
        &settings_input.submission_deadline,
    ];
    let league_id = coerce::id(req.league_id.as_ref());
    let league_id = match league_id {
        Some(id) if required.iter().all(|v| coerce::present(v.as_ref()).is_some()) => id,
        _ => return Err(ApiError::invalid("Missing required fields.")),
    };

    let league = require_league_creator(db, league_id, user, "edit settings").await?;

    let settings = validate_settings(&settings_input)
        .map_err(|errors| ApiError::invalid(errors.join(", ")))?;

    let mut active: leagues::ActiveModel = league.into();
    apply_settings(&mut active, settings);
    active.update(db).await?;

    log::info!("League {} settings updated by {}", league_id, user.id);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyMember,
}

pub async fn join_league<C>(
    db: &C,
    user: &AuthenticatedUser,
    req: JoinLeagueRequest,
) -> ApiResult<JoinOutcome>
where
    C: ConnectionTrait + TransactionTrait,
{
    let league_id = coerce::id(req.league_id.as_ref());
    let passkey = req.passkey.as_deref().filter(|p| !p.is_empty());
    let (league_id, passkey) = match (league_id, passkey) {
        (Some(id), Some(passkey)) => (id, passkey),
        _ => return Err(ApiError::invalid("Missing required fields")),
    };

    let league = leagues::Entity::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("League not found"))?;

    if league.passkey != passkey {
        return Err(ApiError::forbidden("Incorrect passkey"));
    }

    let membership = league_members::Entity::find_by_id((league_id, user.id))
        .one(db)
        .await?;
    if membership.is_some() {
        return Ok(JoinOutcome::AlreadyMember);
    }

    let txn = db.begin().await?;
    league_members::Entity::insert(league_members::ActiveModel {
        league_id: Set(league_id),
        user_id: Set(user.id),
        joined_at: Set(Utc::now().naive_utc()),
    })
    .on_conflict(
        OnConflict::columns([
            league_members::Column::LeagueId,
            league_members::Column::UserId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;
    set_affiliation(&txn, user.id, &league).await?;
    txn.commit().await?;

    log::info!("User {} joined league {}", user.id, league_id);
    Ok(JoinOutcome::Joined)
}

/// Attach creator and member ids to each league with two batched queries.
async fn load_league_views<C: ConnectionTrait>(
    db: &C,
    leagues: Vec<leagues::Model>,
) -> ApiResult<Vec<LeagueResponse>> {
    if leagues.is_empty() {
        return Ok(Vec::new());
    }

    let league_ids: Vec<i32> = leagues.iter().map(|l| l.id).collect();
    let creator_ids: Vec<i32> = leagues.iter().map(|l| l.creator_id).collect();

    let mut members: HashMap<i32, Vec<i32>> = HashMap::new();
    for member in league_members::Entity::find()
        .filter(league_members::Column::LeagueId.is_in(league_ids))
        .order_by_asc(league_members::Column::JoinedAt)
        .all(db)
        .await?
    {
        members.entry(member.league_id).or_default().push(member.user_id);
    }

    let creators: HashMap<i32, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(creator_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(leagues
        .into_iter()
        .map(|league| {
            let creator = creators
                .get(&league.creator_id)
                .cloned()
                .map(CreatorSummary::from);
            let member_ids = members.remove(&league.id).unwrap_or_default();
            LeagueResponse::new(league, creator, member_ids)
        })
        .collect())
}

pub async fn get_league<C: ConnectionTrait>(db: &C, league_id: i32) -> ApiResult<LeagueResponse> {
    let league = leagues::Entity::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("League not found"))?;

    load_league_views(db, vec![league])
        .await?
        .pop()
        .ok_or_else(|| ApiError::not_found("League not found"))
}

/// `LIKE` pattern matching `needle` literally anywhere in the column.
fn substring_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

/// Case-insensitive substring search over league names, sorted by name.
pub async fn search_leagues<C: ConnectionTrait>(
    db: &C,
    name: Option<&str>,
) -> ApiResult<Vec<LeagueResponse>> {
    let needle = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::invalid("League name required"))?
        .to_lowercase();

    let found = leagues::Entity::find()
        .filter(leagues::Column::NameKey.like(substring_pattern(&needle)))
        .order_by_asc(leagues::Column::Name)
        .all(db)
        .await?;

    if found.is_empty() {
        return Err(ApiError::not_found("No matching leagues found"));
    }
    load_league_views(db, found).await
}

pub async fn user_leagues<C: ConnectionTrait>(
    db: &C,
    username: Option<&str>,
) -> ApiResult<Vec<LeagueResponse>> {
    let user = match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(username) => find_user_by_username(db, username).await?,
        None => None,
    }
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    let league_ids: Vec<i32> = league_members::Entity::find()
        .filter(league_members::Column::UserId.eq(user.id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.league_id)
        .collect();

    if league_ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = leagues::Entity::find()
        .filter(leagues::Column::Id.is_in(league_ids))
        .order_by_asc(leagues::Column::Id)
        .all(db)
        .await?;
    load_league_views(db, found).await
}
