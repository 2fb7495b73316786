use serde::Deserialize;

/// Query string of `/api/odds`. Everything except `sport` has a default; props are off unless asked for.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OddsQuery {
    pub sport: Option<String>,
    pub base_markets: Option<String>,
    pub bookmakers: Option<String>,
    pub regions: Option<String>,
    pub odds_format: Option<String>,
    pub week: Option<String>,
    pub sunday_only: Option<String>,
    pub include_props: Option<String>,
    pub season_start_et: Option<String>,
}

/// `1`, `true` and `yes` (any case) switch a flag on.
pub fn flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_truthy_spellings() {
        assert!(flag(None, true));
        assert!(!flag(None, false));
        assert!(flag(Some("YES"), false));
        assert!(!flag(Some("0"), true));
        assert!(!flag(Some("off"), true));
    }
}
