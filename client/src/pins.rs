use fpl_shared::{PinRequest, PinResponse, PinnedSet, pinned_label, strip_pin_glyph};

use crate::config::{PIN_ENDPOINT, PINNED_STORAGE_KEY};
use crate::console;
use crate::navigation::Navigator;
use crate::storage::KeyValueStore;

/// Backend that owns the authoritative pinned set.
#[allow(async_fn_in_trait)]
pub trait PinApi {
    async fn send(&self, request: &PinRequest) -> Result<PinResponse, String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpPinApi;

impl PinApi for HttpPinApi {
    async fn send(&self, request: &PinRequest) -> Result<PinResponse, String> {
        let resp = gloo_net::http::Request::post(PIN_ENDPOINT)
            .json(request)
            .map_err(|e| format!("encode error: {e}"))?
            .send()
            .await
            .map_err(|e| format!("fetch error: {e}"))?;

        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }

        resp.json::<PinResponse>()
            .await
            .map_err(|e| format!("parse error: {e}"))
    }
}

/// A stats table row that can show the pin marker.
pub trait PlayerRow {
    fn name_text(&self) -> String;
    fn set_name_text(&self, text: &str);
    fn set_pinned(&self, pinned: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinToggleOutcome {
    /// Server confirmed; local copy replaced and the page is reloading.
    Reloading,
    /// Request failed; nothing changed locally and the user is not told.
    Failed(String),
}

pub struct PinController<S, A, N> {
    store: S,
    api: A,
    navigator: N,
}

impl<S: KeyValueStore, A: PinApi, N: Navigator> PinController<S, A, N> {
    pub fn new(store: S, api: A, navigator: N) -> Self {
        Self {
            store,
            api,
            navigator,
        }
    }

    /// Locally cached pinned set. Any storage or parse failure reads as empty.
    pub fn get_pinned_players(&self) -> PinnedSet {
        self.store
            .load::<PinnedSet>(PINNED_STORAGE_KEY)
            .unwrap_or_default()
    }

    pub fn save_pinned_players(&self, pinned: &PinnedSet) {
        if let Err(e) = self.store.store(PINNED_STORAGE_KEY, pinned) {
            console::warn(&format!("failed to save pinned players: {e}"));
        }
    }

    /// Ask the server to flip `name` and reload once it confirms.
    pub async fn toggle_pin(&self, name: &str) -> PinToggleOutcome {
        let action = self.get_pinned_players().action_for(name);
        let request = PinRequest {
            player_name: name.to_string(),
            action,
        };

        let failure = match self.api.send(&request).await {
            Ok(PinResponse {
                success: true,
                pinned_players,
                ..
            }) => {
                self.save_pinned_players(&PinnedSet::from(pinned_players));
                self.navigator.reload();
                return PinToggleOutcome::Reloading;
            }
            Ok(PinResponse { error, .. }) => error.unwrap_or_else(|| "unknown error".to_string()),
            Err(e) => e,
        };

        console::warn(&format!(
            "failed to {} {name}: {failure}",
            action.as_str()
        ));
        PinToggleOutcome::Failed(failure)
    }

    /// Re-apply pin markers to freshly rendered rows. Returns the clean names
    /// in row order. Safe to run any number of times.
    pub fn init_pin_functionality<R: PlayerRow>(&self, rows: &[R]) -> Vec<String> {
        apply_pin_markers(rows, &self.get_pinned_players())
    }
}

pub fn apply_pin_markers<R: PlayerRow>(rows: &[R], pinned: &PinnedSet) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let name = strip_pin_glyph(&row.name_text()).to_string();
            let is_pinned = pinned.contains(&name);
            row.set_pinned(is_pinned);
            if is_pinned {
                row.set_name_text(&pinned_label(&name));
            } else {
                row.set_name_text(&name);
            }
            name
        })
        .collect()
}
