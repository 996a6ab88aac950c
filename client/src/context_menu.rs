use std::cell::RefCell;
use std::rc::Rc;

use fpl_shared::{PIN_GLYPH, PinAction};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::config::CONTEXT_MENU_CLASS;
use crate::dom;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        player: String,
        action: PinAction,
        x: i32,
        y: i32,
    },
}

/// Single-instance pin menu. Every open gets a fresh generation so that
/// listeners left over from a replaced menu can tell they are stale.
#[derive(Debug, Default)]
pub struct ContextMenu {
    state: MenuState,
    generation: u64,
}

impl ContextMenu {
    /// Open for `player`, replacing any open menu. Returns the new generation.
    pub fn open(&mut self, player: &str, action: PinAction, x: i32, y: i32) -> u64 {
        self.generation += 1;
        self.state = MenuState::Open {
            player: player.to_string(),
            action,
            x,
            y,
        };
        self.generation
    }

    /// Close the menu, returning the player it targeted if it was open.
    pub fn close(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            MenuState::Open { player, .. } => Some(player),
            MenuState::Closed => None,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.is_open()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }
}

pub fn menu_style(x: i32, y: i32) -> String {
    format!("position: fixed; left: {x}px; top: {y}px; z-index: 1000;")
}

pub fn menu_item_label(action: PinAction) -> String {
    match action {
        PinAction::Pin => format!("{PIN_GLYPH} Pin player"),
        PinAction::Unpin => "Unpin player".to_string(),
    }
}

struct OpenMenu {
    generation: u64,
    element: web_sys::Element,
    _item_handler: Closure<dyn FnMut(web_sys::MouseEvent)>,
    _deferral: Timeout,
    dismiss: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

thread_local! {
    static MENU: RefCell<ContextMenu> = RefCell::new(ContextMenu::default());
    static MENU_DOM: RefCell<Option<OpenMenu>> = const { RefCell::new(None) };
}

/// Show the pin menu at the pointer for `player`. `on_select` runs when the
/// menu item is clicked.
pub fn show_context_menu(
    event: &web_sys::MouseEvent,
    player: &str,
    action: PinAction,
    on_select: Rc<dyn Fn(String)>,
) {
    event.prevent_default();
    close_context_menu();

    let generation = MENU.with(|menu| {
        menu.borrow_mut()
            .open(player, action, event.client_x(), event.client_y())
    });
    let state = MENU.with(|menu| menu.borrow().state().clone());
    let MenuState::Open {
        player,
        action,
        x,
        y,
    } = state
    else {
        return;
    };

    let Some(document) = dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let (Ok(menu), Ok(item)) = (document.create_element("div"), document.create_element("div"))
    else {
        return;
    };

    menu.set_class_name(CONTEXT_MENU_CLASS);
    let _ = menu.set_attribute("style", &menu_style(x, y));
    item.set_class_name("pin-context-menu-item");
    item.set_text_content(Some(&menu_item_label(action)));

    let item_handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
        e.stop_propagation();
        on_select(player.clone());
        close_context_menu();
    });
    let _ = item.add_event_listener_with_callback("click", item_handler.as_ref().unchecked_ref());
    let _ = menu.append_child(&item);
    let _ = body.append_child(&menu);

    // The click that led here is still dispatching; listen only after it settles.
    let deferral = Timeout::new(0, move || attach_dismiss_listener(generation));

    MENU_DOM.with(|slot| {
        *slot.borrow_mut() = Some(OpenMenu {
            generation,
            element: menu,
            _item_handler: item_handler,
            _deferral: deferral,
            dismiss: None,
        });
    });
}

pub fn close_context_menu() {
    MENU.with(|menu| menu.borrow_mut().close());
    let Some(open) = MENU_DOM.with(|slot| slot.borrow_mut().take()) else {
        return;
    };

    open.element.remove();
    if let Some(handler) = open.dismiss.as_ref()
        && let Some(document) = dom::document()
    {
        let _ = document
            .remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    }
}

fn attach_dismiss_listener(generation: u64) {
    let Some(document) = dom::document() else {
        return;
    };

    MENU_DOM.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(open) = slot.as_mut().filter(|open| open.generation == generation) else {
            return;
        };

        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let current = MENU.with(|menu| menu.borrow().is_current(generation));
            if current {
                close_context_menu();
            }
        });
        if document
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            open.dismiss = Some(handler);
        }
    });
}

#[cfg(test)]
mod tests {
    use fpl_shared::PinAction;

    use super::{ContextMenu, MenuState, menu_item_label, menu_style};

    #[test]
    fn starts_closed() {
        let menu = ContextMenu::default();
        assert_eq!(menu.state(), &MenuState::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn open_captures_target() {
        let mut menu = ContextMenu::default();
        menu.open("Salah", PinAction::Pin, 120, 48);
        assert_eq!(
            menu.state(),
            &MenuState::Open {
                player: "Salah".to_string(),
                action: PinAction::Pin,
                x: 120,
                y: 48,
            }
        );
    }

    #[test]
    fn opening_again_replaces_the_previous_menu() {
        let mut menu = ContextMenu::default();
        let first = menu.open("Salah", PinAction::Pin, 0, 0);
        let second = menu.open("Saka", PinAction::Unpin, 10, 10);

        assert_ne!(first, second);
        assert!(!menu.is_current(first));
        assert!(menu.is_current(second));
        assert!(matches!(
            menu.state(),
            MenuState::Open { player, action: PinAction::Unpin, .. } if player == "Saka"
        ));
    }

    #[test]
    fn close_returns_target_once() {
        let mut menu = ContextMenu::default();
        let generation = menu.open("Palmer", PinAction::Pin, 5, 5);

        assert_eq!(menu.close().as_deref(), Some("Palmer"));
        assert_eq!(menu.close(), None);
        assert!(!menu.is_open());
        assert!(!menu.is_current(generation));
    }

    #[test]
    fn menu_is_placed_at_the_pointer() {
        assert_eq!(
            menu_style(120, 48),
            "position: fixed; left: 120px; top: 48px; z-index: 1000;"
        );
    }

    #[test]
    fn item_label_reflects_action() {
        assert_eq!(menu_item_label(PinAction::Pin), "📌 Pin player");
        assert_eq!(menu_item_label(PinAction::Unpin), "Unpin player");
    }
}
