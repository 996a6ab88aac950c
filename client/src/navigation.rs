use crate::console;

/// Full-page navigation. Every filter change and confirmed pin toggle goes
/// through here; nothing is updated in place.
pub trait Navigator {
    fn navigate(&self, url: &str);
    fn reload(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DomNavigator;

impl Navigator for DomNavigator {
    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            console::warn(&format!("navigation to {url} failed: {e:?}"));
        }
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().reload() {
            console::warn(&format!("page reload failed: {e:?}"));
        }
    }
}

#[cfg(test)]
pub mod recording {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Navigator;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Visit {
        Navigate(String),
        Reload,
    }

    /// Records visits instead of leaving the page.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNavigator {
        visits: Rc<RefCell<Vec<Visit>>>,
    }

    impl RecordingNavigator {
        pub fn visits(&self) -> Vec<Visit> {
            self.visits.borrow().clone()
        }

        pub fn urls(&self) -> Vec<String> {
            self.visits
                .borrow()
                .iter()
                .filter_map(|visit| match visit {
                    Visit::Navigate(url) => Some(url.clone()),
                    Visit::Reload => None,
                })
                .collect()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.visits
                .borrow_mut()
                .push(Visit::Navigate(url.to_string()));
        }

        fn reload(&self) {
            self.visits.borrow_mut().push(Visit::Reload);
        }
    }
}
