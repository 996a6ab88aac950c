mod bindings;
mod config;
mod console;
mod context_menu;
mod debounce;
mod dom;
mod filters;
mod message;
mod navigation;
mod pins;
mod storage;

use fpl_shared::FilterState;
use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

use crate::bindings::BrowserFilterSync;
use crate::config::MESSAGE_DEMO_ID;
use crate::debounce::BrowserScheduler;
use crate::dom::DomFilterWidgets;
use crate::navigation::DomNavigator;
use crate::pins::{HttpPinApi, PinController};
use crate::storage::BrowserStore;

thread_local! {
    static MESSAGE_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(document) = dom::document() else {
        return;
    };

    let max_games = dom::max_games();
    let loaded = FilterState::from_query(&dom::page_query(), max_games);
    let filters: Rc<RefCell<BrowserFilterSync>> =
        BrowserFilterSync::new(DomFilterWidgets, DomNavigator, BrowserScheduler, loaded);
    dom::render_games_label(max_games);
    bindings::bind_filters(&filters, max_games);

    let pins = Rc::new(PinController::new(BrowserStore, HttpPinApi, DomNavigator));
    let rows = dom::player_rows();
    let names = pins.init_pin_functionality(&rows);
    bindings::bind_pin_menu(&pins, &rows, &names);
    console::info(&format!("stats page ready ({} player rows)", rows.len()));

    let Some(target) = document
        .get_element_by_id(MESSAGE_DEMO_ID)
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };

    MESSAGE_MOUNT_HANDLE.with(move |slot| {
        // A re-entered main() must not leave a second live mount behind.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, message::MessageDemo);
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
