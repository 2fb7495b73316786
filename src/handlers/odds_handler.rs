use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::services::odds::{
    kicks_off_on, week_sunday, OddsClient, OddsError, SlateRequest, DEFAULT_SEASON_START_ET,
};
use crate::types::odds::{flag, OddsQuery};

const DEFAULT_BASE_MARKETS: &str = "h2h,spreads,totals";
const DEFAULT_BOOKMAKERS: &str = "fanduel";
const DEFAULT_REGIONS: &str = "us";
const DEFAULT_ODDS_FORMAT: &str = "decimal";
const PROPS_HEADER: &str = "X-Props-Present";

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub async fn get_odds(
    odds: web::Data<OddsClient>,
    query: web::Query<OddsQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let sport = query
        .sport
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid("Missing sport"))?;

    if !odds.has_api_key() {
        return Ok(HttpResponse::InternalServerError()
            .json(json!({ "error": OddsError::MissingApiKey.to_string() })));
    }

    let req = SlateRequest {
        sport: sport.to_string(),
        regions: or_default(query.regions.as_deref(), DEFAULT_REGIONS),
        bookmakers: or_default(query.bookmakers.as_deref(), DEFAULT_BOOKMAKERS).to_lowercase(),
        markets: or_default(query.base_markets.as_deref(), DEFAULT_BASE_MARKETS),
        odds_format: or_default(query.odds_format.as_deref(), DEFAULT_ODDS_FORMAT),
    };

    let mut games = match odds.fetch_slate(&req).await {
        Ok(games) => games,
        Err(e) => {
            log::error!("Odds feed request for {} failed: {}", req.sport, e);
            return Ok(HttpResponse::InternalServerError()
                .insert_header((PROPS_HEADER, "false"))
                .json(json!({
                    "error": "Failed to fetch odds",
                    "details": e.to_string(),
                })));
        }
    };

    if flag(query.sunday_only.as_deref(), true) {
        let week = query
            .week
            .as_deref()
            .and_then(|w| w.trim().parse::<u32>().ok())
            .unwrap_or(1);
        let season_start = query
            .season_start_et
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .or_else(|| NaiveDate::parse_from_str(DEFAULT_SEASON_START_ET, "%Y-%m-%d").ok());

        if let Some(start) = season_start {
            match week_sunday(start, week) {
                Some(sunday) => games.retain(|game| kicks_off_on(game, sunday)),
                None => games.clear(),
            }
        }
    }

    let props_found = if flag(query.include_props.as_deref(), false) && !games.is_empty() {
        odds.attach_props(&req, &mut games).await
    } else {
        0
    };
    log::debug!(
        "Serving {} {} games ({} prop markets merged)",
        games.len(),
        req.sport,
        props_found
    );

    Ok(HttpResponse::Ok()
        .insert_header((PROPS_HEADER, (props_found > 0).to_string()))
        .json(games))
}
