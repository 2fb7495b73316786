//! Reverse proxy for the third-party odds feed, with a TTL cache for the
//! per-event player-prop lookups.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, FixedOffset, NaiveDate, Weekday};
use futures_util::{stream, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::constants::config::AppConfig;
use crate::utils::cache::{create_cache_key, Clock, SystemClock, TtlCache};

pub const PROP_MARKETS: [&str; 6] = [
    "player_pass_yds",
    "player_reception_tds",
    "player_reception_yds",
    "player_rush_yds",
    "player_1st_td",
    "player_anytime_td",
];

pub const DEFAULT_SEASON_START_ET: &str = "2025-09-07";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const PROPS_CONCURRENCY: usize = 2;
const PROPS_BACKOFF: Duration = Duration::from_millis(300);
/// Eastern time is modelled as a fixed UTC-4 (daylight time covers the regular season start).
const EASTERN_OFFSET_SECS: i32 = -4 * 3600;

#[derive(Debug, Error)]
pub enum OddsError {
    #[error("Missing ODDS_API_KEY on server")]
    MissingApiKey,
    #[error("Odds feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Odds feed returned an unexpected payload")]
    UnexpectedPayload,
}

/// Parameters forwarded to the feed for one slate request.
#[derive(Debug, Clone)]
pub struct SlateRequest {
    pub sport: String,
    pub regions: String,
    pub bookmakers: String,
    pub markets: String,
    pub odds_format: String,
}

pub struct OddsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    props_cache: TtlCache<String, Vec<Value>>,
}

impl OddsClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: config.odds_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.odds_api_key.clone(),
            props_cache: TtlCache::new(config.odds_cache_ttl, clock),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, OddsError> {
        self.api_key.as_deref().ok_or(OddsError::MissingApiKey)
    }

    /// Core markets for every upcoming game of the sport.
    pub async fn fetch_slate(&self, req: &SlateRequest) -> Result<Vec<Value>, OddsError> {
        let url = format!("{}/sports/{}/odds", self.base_url, req.sport);
        let body: Value = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key()?),
                ("regions", req.regions.as_str()),
                ("bookmakers", req.bookmakers.as_str()),
                ("markets", req.markets.as_str()),
                ("oddsFormat", req.odds_format.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body {
            Value::Array(games) => Ok(games),
            _ => Err(OddsError::UnexpectedPayload),
        }
    }

    /// Player-prop bookmakers for one event. Served from cache while fresh;
    /// a failed lookup yields no props rather than an error.
    pub async fn fetch_props(&self, req: &SlateRequest, event_id: &str) -> Vec<Value> {
        let key = create_cache_key(
            &format!("{}:{}", req.sport, req.bookmakers),
            &format!("{}:{}", event_id, PROP_MARKETS.join(",")),
        );
        if let Some(books) = self.props_cache.get(&key) {
            return books;
        }

        match self.request_props(req, event_id).await {
            Ok(books) => {
                self.props_cache.set(key, books.clone());
                books
            }
            Err(e) => {
                log::warn!("Props lookup for event {} failed: {}", event_id, e);
                Vec::new()
            }
        }
    }

    async fn request_props(
        &self,
        req: &SlateRequest,
        event_id: &str,
    ) -> Result<Vec<Value>, OddsError> {
        let url = format!(
            "{}/sports/{}/events/{}/odds",
            self.base_url, req.sport, event_id
        );
        let markets = PROP_MARKETS.join(",");
        let body: Value = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key()?),
                ("regions", req.regions.as_str()),
                ("bookmakers", req.bookmakers.as_str()),
                ("markets", markets.as_str()),
                ("oddsFormat", req.odds_format.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body
            .get("bookmakers")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Merge player props into each game, at most two lookups in flight.
    /// Returns the number of prop markets that carried outcomes.
    pub async fn attach_props(&self, req: &SlateRequest, games: &mut [Value]) -> usize {
        let event_ids: Vec<Option<String>> = games
            .iter()
            .map(|g| g.get("id").and_then(Value::as_str).map(str::to_owned))
            .collect();

        let lookups: Vec<Vec<Value>> = stream::iter(event_ids)
            .map(|event_id| async move {
                match event_id {
                    Some(id) => {
                        let books = self.fetch_props(req, &id).await;
                        tokio::time::sleep(PROPS_BACKOFF).await;
                        books
                    }
                    None => Vec::new(),
                }
            })
            .buffered(PROPS_CONCURRENCY)
            .collect()
            .await;

        games
            .iter_mut()
            .zip(lookups.iter())
            .map(|(game, books)| merge_props(game, books))
            .sum()
    }
}

/// Sunday (Eastern) of the given season week; week 1 is `season_start`.
/// `None` when the week lands outside the representable calendar.
pub fn week_sunday(season_start: NaiveDate, week: u32) -> Option<NaiveDate> {
    season_start.checked_add_signed(ChronoDuration::weeks(i64::from(week.max(1) - 1)))
}

/// Whether the game kicks off on `sunday`, Eastern time.
pub fn kicks_off_on(game: &Value, sunday: NaiveDate) -> bool {
    let eastern = match FixedOffset::east_opt(EASTERN_OFFSET_SECS) {
        Some(offset) => offset,
        None => return false,
    };
    game.get("commence_time")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&eastern).date_naive())
        .map(|d| d.weekday() == Weekday::Sun && d == sunday)
        .unwrap_or(false)
}

/// Merge prop bookmakers into `game["bookmakers"]`, creating a bookmaker
/// when the game does not list it and replacing same-key markets.
pub fn merge_props(game: &mut Value, prop_books: &[Value]) -> usize {
    if prop_books.is_empty() {
        return 0;
    }
    let Some(game_obj) = game.as_object_mut() else {
        return 0;
    };

    let bookmakers = game_obj
        .entry("bookmakers")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !bookmakers.is_array() {
        *bookmakers = Value::Array(Vec::new());
    }
    let Value::Array(bookmakers) = bookmakers else {
        return 0;
    };

    let mut index: HashMap<String, usize> = bookmakers
        .iter()
        .enumerate()
        .filter_map(|(i, b)| {
            b.get("key")
                .and_then(Value::as_str)
                .map(|k| (k.to_lowercase(), i))
        })
        .collect();

    let mut found = 0;
    for book in prop_books {
        let key = book
            .get("key")
            .or_else(|| book.get("bookmaker").and_then(|b| b.get("key")))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        if key.is_empty() {
            continue;
        }
        let title = book
            .get("title")
            .or_else(|| book.get("bookmaker").and_then(|b| b.get("title")))
            .and_then(Value::as_str)
            .unwrap_or(key.as_str())
            .to_string();

        let idx = *index.entry(key.clone()).or_insert_with(|| {
            bookmakers.push(serde_json::json!({ "key": key, "title": title, "markets": [] }));
            bookmakers.len() - 1
        });

        let target = &mut bookmakers[idx];
        if !target.get("markets").map(Value::is_array).unwrap_or(false) {
            target["markets"] = Value::Array(Vec::new());
        }
        let Some(markets) = target.get_mut("markets").and_then(Value::as_array_mut) else {
            continue;
        };

        let prop_markets = book
            .get("markets")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for market in prop_markets {
            let market_key = market.get("key").and_then(Value::as_str).unwrap_or_default();
            if !PROP_MARKETS.contains(&market_key) {
                continue;
            }
            match markets
                .iter()
                .position(|m| m.get("key").and_then(Value::as_str) == Some(market_key))
            {
                Some(pos) => markets[pos] = market.clone(),
                None => markets.push(market.clone()),
            }
            let has_outcomes = market
                .get("outcomes")
                .and_then(Value::as_array)
                .map(|o| !o.is_empty())
                .unwrap_or(false);
            if has_outcomes {
                found += 1;
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn week_sunday_steps_by_seven_days() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        assert_eq!(week_sunday(start, 1), Some(start));
        assert_eq!(week_sunday(start, 0), Some(start));
        assert_eq!(week_sunday(start, 3), NaiveDate::from_ymd_opt(2025, 9, 21));
    }

    #[test]
    fn week_past_the_calendar_has_no_sunday() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        assert_eq!(week_sunday(start, 100_000_000), None);
        assert_eq!(week_sunday(start, u32::MAX), None);
    }

    #[test]
    fn late_sunday_kickoff_stays_on_sunday_eastern() {
        let sunday = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        // 00:20 UTC Monday is 20:20 Sunday in Eastern daylight time.
        let snf = json!({ "commence_time": "2025-09-08T00:20:00Z" });
        let monday = json!({ "commence_time": "2025-09-09T00:15:00Z" });
        let thursday = json!({ "commence_time": "2025-09-05T00:20:00Z" });

        assert!(kicks_off_on(&snf, sunday));
        assert!(!kicks_off_on(&monday, sunday));
        assert!(!kicks_off_on(&thursday, sunday));
        assert!(!kicks_off_on(&json!({}), sunday));
    }

    #[test]
    fn props_merge_into_matching_bookmaker() {
        let mut game = json!({
            "id": "evt1",
            "bookmakers": [{
                "key": "fanduel",
                "title": "FanDuel",
                "markets": [
                    { "key": "h2h", "outcomes": [{ "name": "Bills" }] },
                    { "key": "player_pass_yds", "outcomes": [] }
                ]
            }]
        });
        let props = vec![json!({
            "key": "FanDuel",
            "markets": [
                { "key": "player_pass_yds", "outcomes": [{ "name": "Allen", "point": 250.5 }] },
                { "key": "alternate_spreads", "outcomes": [{ "name": "Bills" }] }
            ]
        })];

        let found = merge_props(&mut game, &props);

        assert_eq!(found, 1);
        let markets = game["bookmakers"][0]["markets"].as_array().unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[1]["outcomes"][0]["name"], "Allen");
    }

    #[test]
    fn props_create_missing_bookmaker() {
        let mut game = json!({ "id": "evt2" });
        let props = vec![json!({
            "bookmaker": { "key": "draftkings", "title": "DraftKings" },
            "markets": [{ "key": "player_anytime_td", "outcomes": [{ "name": "Kelce" }] }]
        })];

        assert_eq!(merge_props(&mut game, &props), 1);
        assert_eq!(game["bookmakers"][0]["key"], "draftkings");
        assert_eq!(game["bookmakers"][0]["title"], "DraftKings");
    }

    #[test]
    fn missing_api_key_is_reported() {
        let client = OddsClient::new(&AppConfig::new("sqlite::memory:", "secret"));
        assert!(!client.has_api_key());
        assert!(matches!(client.api_key(), Err(OddsError::MissingApiKey)));
    }
}
