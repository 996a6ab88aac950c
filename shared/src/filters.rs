use serde::Serialize;

use crate::sort::{DEFAULT_SORT_COLUMN, SortOrder, SortState};

pub const DEFAULT_MINS_THRESHOLD: u32 = 70;
pub const DEFAULT_GAMES_WINDOW: u32 = 5;
pub const DEFAULT_HORIZON: u32 = 5;
/// Gameweeks in a full season; used when the page does not say otherwise.
pub const DEFAULT_MAX_GAMES: u32 = 38;

/// Player position filter. `All` is sent as an empty `position` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    Gkp,
    Def,
    Mid,
    Fwd,
    #[default]
    All,
}

impl Position {
    pub fn code(self) -> &'static str {
        match self {
            Self::Gkp => "GKP",
            Self::Def => "DEF",
            Self::Mid => "MID",
            Self::Fwd => "FWD",
            Self::All => "",
        }
    }

    /// Unknown codes select every position, same as an empty parameter.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "GKP" => Self::Gkp,
            "DEF" => Self::Def,
            "MID" => Self::Mid,
            "FWD" => Self::Fwd,
            _ => Self::All,
        }
    }
}

/// Complete filter selection for the stats page.
///
/// The same shape describes both the filters a page was rendered with
/// (decoded from its URL) and the filters about to be requested.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub position: Position,
    pub team: String,
    pub mins_threshold: u32,
    pub games_window: u32,
    pub price_max: Option<f64>,
    pub adjust_difficulty: bool,
    pub horizon_games: u32,
    pub search_text: Option<String>,
    pub sort: SortState,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::defaults_for(DEFAULT_MAX_GAMES)
    }
}

#[derive(Serialize)]
struct FilterQuery<'a> {
    position: &'a str,
    team: &'a str,
    mins: u32,
    games: u32,
    adjust_difficulty: bool,
    horizon: u32,
    sort: &'a str,
    order: &'a str,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_max: Option<String>,
}

impl FilterState {
    /// Filters the server applies when a parameter is absent.
    pub fn defaults_for(max_games: u32) -> Self {
        Self {
            position: Position::All,
            team: String::new(),
            mins_threshold: DEFAULT_MINS_THRESHOLD,
            games_window: DEFAULT_GAMES_WINDOW.min(max_games.max(1)),
            price_max: None,
            adjust_difficulty: true,
            horizon_games: DEFAULT_HORIZON,
            search_text: None,
            sort: SortState::default(),
            page: 1,
        }
    }

    /// Decode a page query string (with or without the leading `?`).
    ///
    /// Malformed values fall back to their defaults instead of failing the
    /// whole decode, and `page` is clamped to at least 1.
    pub fn from_query(query: &str, max_games: u32) -> Self {
        let mut state = Self::defaults_for(max_games);
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

        for (key, value) in pairs {
            match key.as_str() {
                "position" => state.position = Position::from_code(&value),
                "team" => state.team = value,
                "mins" => {
                    if let Ok(mins) = value.trim().parse() {
                        state.mins_threshold = mins;
                    }
                }
                "games" => {
                    if let Ok(games) = value.trim().parse::<u32>() {
                        state.games_window = games.max(1);
                    }
                }
                "price_max" => {
                    state.price_max = value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|price| price.is_finite());
                }
                "adjust_difficulty" => state.adjust_difficulty = value == "true",
                "horizon" => {
                    if let Ok(horizon) = value.trim().parse() {
                        state.horizon_games = horizon;
                    }
                }
                "search" => {
                    let trimmed = value.trim();
                    state.search_text = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                "sort" => {
                    let column = value.trim();
                    state.sort.column = if column.is_empty() {
                        DEFAULT_SORT_COLUMN.to_string()
                    } else {
                        column.to_string()
                    };
                }
                "order" => state.sort.order = SortOrder::parse(&value),
                "page" => {
                    if let Ok(page) = value.trim().parse::<i64>() {
                        state.page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
                    }
                }
                _ => {}
            }
        }

        state
    }

    /// Trimmed search text, or `None` when there is nothing to search for.
    pub fn effective_search(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Canonical query string in the parameter order the page expects.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let query = FilterQuery {
            position: self.position.code(),
            team: &self.team,
            mins: self.mins_threshold,
            games: self.games_window,
            adjust_difficulty: self.adjust_difficulty,
            horizon: self.horizon_games,
            sort: &self.sort.column,
            order: self.sort.order.as_str(),
            page: self.page.max(1),
            search: self.effective_search(),
            price_max: self.price_max.map(format_price),
        };
        serde_urlencoded::to_string(&query)
    }

    /// Root-relative URL that loads the page for this selection.
    pub fn navigation_url(&self) -> Result<String, serde_urlencoded::ser::Error> {
        Ok(format!("/?{}", self.to_query_string()?))
    }
}

/// Price cap to send, if any.
///
/// Changing position invalidates the cap the page was rendered with, so the
/// server must recompute a position-appropriate default.
pub fn retained_price_max(
    current: Position,
    loaded: Position,
    price_max: Option<f64>,
) -> Option<f64> {
    if current == loaded { price_max } else { None }
}

pub fn format_price(price: f64) -> String {
    format!("{price:.1}")
}

/// Readout for the games slider; the maximum means every gameweek.
pub fn games_label(games: u32, max_games: u32) -> String {
    if games >= max_games {
        "All".to_string()
    } else {
        games.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> FilterState {
        FilterState {
            position: Position::Mid,
            team: "Arsenal".to_string(),
            mins_threshold: 60,
            games_window: 6,
            price_max: Some(7.5),
            adjust_difficulty: true,
            horizon_games: 3,
            search_text: None,
            sort: SortState::new("now_cost", SortOrder::Asc),
            page: 2,
        }
    }

    #[test]
    fn query_string_has_canonical_parameter_order() {
        let query = sample_state().to_query_string().expect("encode");
        assert_eq!(
            query,
            "position=MID&team=Arsenal&mins=60&games=6&adjust_difficulty=true&horizon=3\
             &sort=now_cost&order=asc&page=2&price_max=7.5"
        );
    }

    #[test]
    fn search_is_omitted_when_blank_after_trim() {
        let mut state = sample_state();
        for blank in [None, Some(""), Some("   "), Some("\t\n")] {
            state.search_text = blank.map(str::to_string);
            let query = state.to_query_string().expect("encode");
            assert!(!query.contains("search="), "unexpected search in {query}");
        }
    }

    #[test]
    fn search_is_trimmed_and_encoded() {
        let mut state = sample_state();
        state.search_text = Some("  Bruno Fernandes ".to_string());
        let query = state.to_query_string().expect("encode");
        assert!(query.contains("&search=Bruno+Fernandes&"), "{query}");
        assert!(query.ends_with("&price_max=7.5"));
    }

    #[test]
    fn all_positions_encode_as_empty_parameter() {
        let mut state = sample_state();
        state.position = Position::All;
        state.price_max = None;
        let url = state.navigation_url().expect("encode");
        assert!(url.starts_with("/?position=&team=Arsenal"));
        assert!(!url.contains("price_max"));
    }

    #[test]
    fn price_is_formatted_with_one_fraction_digit() {
        assert_eq!(format_price(10.0), "10.0");
        assert_eq!(format_price(4.5), "4.5");
        assert_eq!(format_price(6.04), "6.0");
    }

    #[test]
    fn price_is_retained_only_for_unchanged_position() {
        let positions = [
            Position::Gkp,
            Position::Def,
            Position::Mid,
            Position::Fwd,
            Position::All,
        ];
        for loaded in positions {
            for current in positions {
                let retained = retained_price_max(current, loaded, Some(8.0));
                assert_eq!(retained.is_some(), current == loaded);
            }
        }
        assert_eq!(retained_price_max(Position::Def, Position::Def, None), None);
    }

    #[test]
    fn decode_applies_server_defaults() {
        let state = FilterState::from_query("", 38);
        assert_eq!(state.position, Position::All);
        assert_eq!(state.mins_threshold, 70);
        assert_eq!(state.games_window, 5);
        assert!(state.adjust_difficulty);
        assert_eq!(state.horizon_games, 5);
        assert_eq!(state.sort, SortState::default());
        assert_eq!(state.page, 1);
        assert_eq!(state.price_max, None);

        let early_season = FilterState::from_query("", 3);
        assert_eq!(early_season.games_window, 3);
    }

    #[test]
    fn decode_reads_every_parameter() {
        let state = FilterState::from_query(
            "?position=FWD&team=Man+City&mins=40&games=8&adjust_difficulty=false&horizon=2\
             &sort=actual_points&order=asc&page=4&search=haal&price_max=14.5",
            38,
        );
        assert_eq!(state.position, Position::Fwd);
        assert_eq!(state.team, "Man City");
        assert_eq!(state.mins_threshold, 40);
        assert_eq!(state.games_window, 8);
        assert!(!state.adjust_difficulty);
        assert_eq!(state.horizon_games, 2);
        assert_eq!(state.sort, SortState::new("actual_points", SortOrder::Asc));
        assert_eq!(state.page, 4);
        assert_eq!(state.search_text.as_deref(), Some("haal"));
        assert_eq!(state.price_max, Some(14.5));
    }

    #[test]
    fn decode_tolerates_malformed_values() {
        let state = FilterState::from_query("position=XYZ&mins=lots&page=-3&price_max=NaN", 38);
        assert_eq!(state.position, Position::All);
        assert_eq!(state.mins_threshold, 70);
        assert_eq!(state.page, 1);
        assert_eq!(state.price_max, None);
    }

    #[test]
    fn decode_then_encode_keeps_selection() {
        let state = sample_state();
        let query = state.to_query_string().expect("encode");
        assert_eq!(FilterState::from_query(&query, 38), state);
    }

    #[test]
    fn games_label_shows_all_at_maximum() {
        assert_eq!(games_label(5, 38), "5");
        assert_eq!(games_label(38, 38), "All");
        assert_eq!(games_label(40, 38), "All");
    }
}
