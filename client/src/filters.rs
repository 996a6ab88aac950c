use std::cell::RefCell;
use std::rc::Rc;

use fpl_shared::{FilterState, SortState, retained_price_max};

use crate::config::{APPLY_DEBOUNCE_MS, SEARCH_DEBOUNCE_MS};
use crate::console;
use crate::debounce::{Debouncer, Scheduler};
use crate::navigation::Navigator;

/// On/off state of the fixture-difficulty pill. The DOM only renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FutureWindow {
    pub on: bool,
}

impl FutureWindow {
    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    pub fn label(self) -> &'static str {
        if self.on { "On" } else { "Off" }
    }
}

/// Filter form controls on the page.
pub trait FilterWidgets {
    /// Values the controls show right now. Controls missing from the page
    /// report the value the page was loaded with.
    fn read(&self, loaded: &FilterState) -> FilterState;

    fn render_future_window(&self, window: FutureWindow);
}

/// Turns filter widget changes into full-page navigations.
pub struct FilterSyncController<W, N, S: Scheduler> {
    widgets: W,
    navigator: N,
    debouncer: Debouncer<S>,
    loaded: FilterState,
    future_window: FutureWindow,
}

impl<W, N, S> FilterSyncController<W, N, S>
where
    W: FilterWidgets + 'static,
    N: Navigator + 'static,
    S: Scheduler + 'static,
    S::Handle: 'static,
{
    /// `loaded` is the selection the current page was rendered with.
    pub fn new(widgets: W, navigator: N, scheduler: S, loaded: FilterState) -> Rc<RefCell<Self>> {
        let future_window = FutureWindow {
            on: loaded.adjust_difficulty,
        };
        widgets.render_future_window(future_window);
        Rc::new(RefCell::new(Self {
            widgets,
            navigator,
            debouncer: Debouncer::new(scheduler),
            loaded,
            future_window,
        }))
    }

    pub fn schedule_apply(this: &Rc<RefCell<Self>>) {
        Self::schedule(this, APPLY_DEBOUNCE_MS);
    }

    pub fn schedule_search(this: &Rc<RefCell<Self>>) {
        Self::schedule(this, SEARCH_DEBOUNCE_MS);
    }

    fn schedule(this: &Rc<RefCell<Self>>, delay_ms: u32) {
        let weak = Rc::downgrade(this);
        this.borrow_mut().debouncer.schedule(
            delay_ms,
            Box::new(move || {
                if let Some(controller) = weak.upgrade() {
                    controller.borrow_mut().apply_filters(false);
                }
            }),
        );
    }
}

impl<W, N, S> FilterSyncController<W, N, S>
where
    W: FilterWidgets,
    N: Navigator,
    S: Scheduler,
{
    pub fn loaded(&self) -> &FilterState {
        &self.loaded
    }

    pub fn future_window(&self) -> FutureWindow {
        self.future_window
    }

    /// Navigate to the current selection, on page 1 unless `keep_page`.
    pub fn apply_filters(&mut self, keep_page: bool) {
        let page = if keep_page { self.loaded.page } else { 1 };
        let state = self.current_state(page, self.loaded.sort.clone());
        self.navigate_to(&state);
    }

    /// Cycle the sort of `column` relative to the sort the page was rendered with.
    pub fn sort_table(&mut self, column: &str) {
        let sort = self.loaded.sort.next_for(column);
        let state = self.current_state(1, sort);
        self.navigate_to(&state);
    }

    pub fn go_to_page(&mut self, page: u32) {
        let state = self.current_state(page.max(1), self.loaded.sort.clone());
        self.navigate_to(&state);
    }

    pub fn toggle_future_window(&mut self) {
        self.future_window.toggle();
        self.widgets.render_future_window(self.future_window);
        self.apply_filters(true);
    }

    /// Selection to request, read from the widgets at call time.
    pub fn current_state(&self, page: u32, sort: SortState) -> FilterState {
        let mut state = self.widgets.read(&self.loaded);
        state.price_max = retained_price_max(state.position, self.loaded.position, state.price_max);
        state.adjust_difficulty = self.future_window.on;
        state.sort = sort;
        state.page = page;
        state
    }

    fn navigate_to(&mut self, state: &FilterState) {
        self.debouncer.cancel();
        match state.navigation_url() {
            Ok(url) => self.navigator.navigate(&url),
            Err(e) => console::warn(&format!("failed to encode filters: {e}")),
        }
    }
}
