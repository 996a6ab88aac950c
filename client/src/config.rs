pub const APPLY_DEBOUNCE_MS: u32 = 500;
pub const SEARCH_DEBOUNCE_MS: u32 = 600;

pub const PINNED_STORAGE_KEY: &str = "fpl_pinned_players";
pub const PIN_ENDPOINT: &str = "/api/pin-player";
pub const MESSAGE_ENDPOINT: &str = "/api/message";

// Element ids rendered by the stats page template.
pub const POSITION_DROPDOWN_ID: &str = "position-dropdown";
pub const TEAM_DROPDOWN_ID: &str = "team-dropdown";
pub const MINS_SLIDER_ID: &str = "mins-slider";
pub const GAMES_SLIDER_ID: &str = "games-slider";
pub const GAMES_VALUE_ID: &str = "games-value";
pub const PRICE_SLIDER_ID: &str = "price-slider";
pub const FUTURE_SLIDER_ID: &str = "future-slider";
pub const FUTURE_WINDOW_ITEM_ID: &str = "future-window-item";
pub const ADJUST_DIFFICULTY_TOGGLE_ID: &str = "adjust-difficulty-toggle";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const MESSAGE_DEMO_ID: &str = "message-demo";

pub const PLAYER_ROW_SELECTOR: &str = "tbody tr";
pub const PLAYER_NAME_SELECTOR: &str = ".player-name";
pub const CONTEXT_MENU_CLASS: &str = "pin-context-menu";
