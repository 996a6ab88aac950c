//! Page event wiring. Listener closures live as long as the page does.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

use crate::config::{
    ADJUST_DIFFICULTY_TOGGLE_ID, FUTURE_SLIDER_ID, GAMES_SLIDER_ID, MINS_SLIDER_ID,
    POSITION_DROPDOWN_ID, PRICE_SLIDER_ID, SEARCH_INPUT_ID, TEAM_DROPDOWN_ID,
};
use crate::context_menu::show_context_menu;
use crate::debounce::BrowserScheduler;
use crate::dom::{self, DomFilterWidgets, DomPlayerRow};
use crate::filters::FilterSyncController;
use crate::navigation::DomNavigator;
use crate::pins::{HttpPinApi, PinController};
use crate::storage::BrowserStore;

pub type BrowserFilterSync = FilterSyncController<DomFilterWidgets, DomNavigator, BrowserScheduler>;
pub type BrowserPinController = PinController<BrowserStore, HttpPinApi, DomNavigator>;

thread_local! {
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = const { RefCell::new(Vec::new()) };
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_ok()
    {
        LISTENERS.with(|listeners| listeners.borrow_mut().push(closure));
    }
}

fn listen_by_id(id: &str, event: &str, handler: impl FnMut(Event) + 'static) {
    if let Some(element) = dom::element_by_id(id) {
        listen(&element, event, handler);
    }
}

pub fn bind_filters(controller: &Rc<RefCell<BrowserFilterSync>>, max_games: u32) {
    for id in [POSITION_DROPDOWN_ID, TEAM_DROPDOWN_ID] {
        let controller = Rc::clone(controller);
        listen_by_id(id, "change", move |_| {
            controller.borrow_mut().apply_filters(false);
        });
    }

    for id in [MINS_SLIDER_ID, PRICE_SLIDER_ID, FUTURE_SLIDER_ID] {
        let controller = Rc::clone(controller);
        listen_by_id(id, "input", move |_| {
            BrowserFilterSync::schedule_apply(&controller);
        });
    }

    {
        let controller = Rc::clone(controller);
        listen_by_id(GAMES_SLIDER_ID, "input", move |_| {
            dom::render_games_label(max_games);
            BrowserFilterSync::schedule_apply(&controller);
        });
    }

    {
        let controller = Rc::clone(controller);
        listen_by_id(SEARCH_INPUT_ID, "input", move |_| {
            BrowserFilterSync::schedule_search(&controller);
        });
    }

    {
        let controller = Rc::clone(controller);
        listen_by_id(SEARCH_INPUT_ID, "keydown", move |e| {
            let enter = e
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Enter");
            if enter {
                e.prevent_default();
                controller.borrow_mut().apply_filters(false);
            }
        });
    }

    {
        let controller = Rc::clone(controller);
        listen_by_id(ADJUST_DIFFICULTY_TOGGLE_ID, "click", move |e| {
            e.prevent_default();
            controller.borrow_mut().toggle_future_window();
        });
    }

    for header in dom::elements_matching("[data-sort]") {
        let Some(column) = header.get_attribute("data-sort") else {
            continue;
        };
        let controller = Rc::clone(controller);
        listen(&header, "click", move |_| {
            controller.borrow_mut().sort_table(&column);
        });
    }

    for link in dom::elements_matching("[data-page]") {
        let Some(page) = link
            .get_attribute("data-page")
            .and_then(|page| page.trim().parse::<u32>().ok())
        else {
            continue;
        };
        let controller = Rc::clone(controller);
        listen(&link, "click", move |e| {
            e.prevent_default();
            controller.borrow_mut().go_to_page(page);
        });
    }
}

/// Attach the pin menu to each row. `names` are the clean player names in
/// row order.
pub fn bind_pin_menu(pins: &Rc<BrowserPinController>, rows: &[DomPlayerRow], names: &[String]) {
    let on_select: Rc<dyn Fn(String)> = {
        let pins = Rc::clone(pins);
        Rc::new(move |name: String| {
            let pins = Rc::clone(&pins);
            wasm_bindgen_futures::spawn_local(async move {
                pins.toggle_pin(&name).await;
            });
        })
    };

    for (row, name) in rows.iter().zip(names) {
        let pins = Rc::clone(pins);
        let on_select = Rc::clone(&on_select);
        let name = name.clone();
        listen(row.element(), "contextmenu", move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let action = pins.get_pinned_players().action_for(&name);
            show_context_menu(mouse, &name, action, Rc::clone(&on_select));
        });
    }
}
