use std::str::FromStr;

use fpl_shared::{DEFAULT_MAX_GAMES, FilterState, PINNED_ROW_CLASS, Position, games_label};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::config::{
    ADJUST_DIFFICULTY_TOGGLE_ID, FUTURE_SLIDER_ID, FUTURE_WINDOW_ITEM_ID, GAMES_SLIDER_ID,
    GAMES_VALUE_ID, MINS_SLIDER_ID, PLAYER_NAME_SELECTOR, PLAYER_ROW_SELECTOR,
    POSITION_DROPDOWN_ID, PRICE_SLIDER_ID, SEARCH_INPUT_ID, TEAM_DROPDOWN_ID,
};
use crate::filters::{FilterWidgets, FutureWindow};
use crate::pins::PlayerRow;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn elements_matching(selector: &str) -> Vec<Element> {
    let Some(nodes) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Query string of the current page, including the leading `?` if any.
pub fn page_query() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

/// Current value of an `<input>` or `<select>`.
pub fn control_value(id: &str) -> Option<String> {
    let element = element_by_id(id)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

fn parsed_control<T: FromStr>(id: &str) -> Option<T> {
    control_value(id)?.trim().parse().ok()
}

/// Games in the season so far, from the games slider's `max` attribute.
pub fn max_games() -> u32 {
    element_by_id(GAMES_SLIDER_ID)
        .and_then(|slider| slider.get_attribute("max"))
        .and_then(|max| max.trim().parse::<u32>().ok())
        .filter(|max| *max > 0)
        .unwrap_or(DEFAULT_MAX_GAMES)
}

pub fn render_games_label(max_games: u32) {
    let Some(games) = parsed_control::<u32>(GAMES_SLIDER_ID) else {
        return;
    };
    if let Some(readout) = element_by_id(GAMES_VALUE_ID) {
        readout.set_text_content(Some(&games_label(games, max_games)));
    }
}

/// The filter form as rendered by the stats page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomFilterWidgets;

impl FilterWidgets for DomFilterWidgets {
    fn read(&self, loaded: &FilterState) -> FilterState {
        let mut state = loaded.clone();

        if let Some(code) = control_value(POSITION_DROPDOWN_ID) {
            state.position = Position::from_code(&code);
        }
        if let Some(team) = control_value(TEAM_DROPDOWN_ID) {
            state.team = team;
        }
        if let Some(mins) = parsed_control(MINS_SLIDER_ID) {
            state.mins_threshold = mins;
        }
        if let Some(games) = parsed_control::<u32>(GAMES_SLIDER_ID) {
            state.games_window = games.max(1);
        }
        if let Some(horizon) = parsed_control(FUTURE_SLIDER_ID) {
            state.horizon_games = horizon;
        }
        if let Some(price) = parsed_control::<f64>(PRICE_SLIDER_ID).filter(|p| p.is_finite()) {
            state.price_max = Some(price);
        }
        if let Some(search) = control_value(SEARCH_INPUT_ID) {
            state.search_text = Some(search);
        }

        state
    }

    fn render_future_window(&self, window: FutureWindow) {
        if let Some(pill) = element_by_id(ADJUST_DIFFICULTY_TOGGLE_ID) {
            let _ = pill.set_attribute("data-on", if window.on { "true" } else { "false" });
            let _ = pill.class_list().toggle_with_force("active", window.on);
            pill.set_text_content(Some(window.label()));
        }

        let item = element_by_id(FUTURE_WINDOW_ITEM_ID)
            .and_then(|item| item.dyn_into::<HtmlElement>().ok());
        if let Some(item) = item {
            let style = item.style();
            let _ = if window.on {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", "none")
            };
        }
    }
}

/// One `<tr>` of the stats table and its player name cell.
pub struct DomPlayerRow {
    row: Element,
    cell: Element,
}

impl DomPlayerRow {
    pub fn element(&self) -> &Element {
        &self.row
    }
}

impl PlayerRow for DomPlayerRow {
    fn name_text(&self) -> String {
        self.cell.text_content().unwrap_or_default()
    }

    fn set_name_text(&self, text: &str) {
        self.cell.set_text_content(Some(text));
    }

    fn set_pinned(&self, pinned: bool) {
        let _ = self
            .row
            .class_list()
            .toggle_with_force(PINNED_ROW_CLASS, pinned);
    }
}

/// Table rows that carry a player name cell. Empty when the page has no table.
pub fn player_rows() -> Vec<DomPlayerRow> {
    elements_matching(PLAYER_ROW_SELECTOR)
        .into_iter()
        .filter_map(|row| {
            let cell = row.query_selector(PLAYER_NAME_SELECTOR).ok().flatten()?;
            Some(DomPlayerRow { row, cell })
        })
        .collect()
}
