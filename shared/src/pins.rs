use serde::{Deserialize, Serialize};

/// Glyph prefixed to the name cell of a pinned player.
pub const PIN_GLYPH: &str = "📌";
pub const PINNED_ROW_CLASS: &str = "pinned-row";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinAction {
    Pin,
    Unpin,
}

impl PinAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Unpin => "unpin",
        }
    }
}

/// Body of `POST /api/pin-player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRequest {
    pub player_name: String,
    pub action: PinAction,
}

/// Reply from the pin endpoints. `pinned_players` is the authoritative set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinResponse {
    pub success: bool,
    #[serde(default)]
    pub pinned_players: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PinResponse {
    pub fn ok(pinned: &PinnedSet) -> Self {
        Self {
            success: true,
            pinned_players: pinned.names().to_vec(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            pinned_players: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Ordered set of pinned player display names, unique on exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct PinnedSet(Vec<String>);

impl From<Vec<String>> for PinnedSet {
    fn from(names: Vec<String>) -> Self {
        let mut set = PinnedSet::default();
        for name in names {
            set.insert(name);
        }
        set
    }
}

impl PinnedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|pinned| pinned == name)
    }

    /// Appends `name` unless already pinned. Returns whether the set changed.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|pinned| pinned != name);
        self.0.len() != before
    }

    /// Action a toggle of `name` should request.
    pub fn action_for(&self, name: &str) -> PinAction {
        if self.contains(name) {
            PinAction::Unpin
        } else {
            PinAction::Pin
        }
    }

    pub fn apply(&mut self, action: PinAction, name: &str) -> bool {
        match action {
            PinAction::Pin => self.insert(name),
            PinAction::Unpin => self.remove(name),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Display name with any leading pin glyph removed.
pub fn strip_pin_glyph(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix(PIN_GLYPH) {
        Some(rest) => strip_pin_glyph(rest),
        None => trimmed,
    }
}

pub fn pinned_label(name: &str) -> String {
    format!("{PIN_GLYPH} {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_follows_membership() {
        let set = PinnedSet::from(vec!["Salah".to_string()]);
        assert_eq!(set.action_for("Salah"), PinAction::Unpin);
        assert_eq!(set.action_for("Haaland"), PinAction::Pin);
        assert_eq!(set.action_for("salah"), PinAction::Pin);
    }

    #[test]
    fn insert_and_remove_keep_order_and_uniqueness() {
        let mut set = PinnedSet::new();
        assert!(set.insert("Saka"));
        assert!(set.insert("Palmer"));
        assert!(!set.insert("Saka"));
        assert_eq!(set.names(), ["Saka", "Palmer"]);

        assert!(set.remove("Saka"));
        assert!(!set.remove("Saka"));
        assert_eq!(set.names(), ["Palmer"]);
    }

    #[test]
    fn decoding_drops_duplicates() {
        let set: PinnedSet =
            serde_json::from_str(r#"["Salah","Watkins","Salah"]"#).expect("parse pinned set");
        assert_eq!(set.names(), ["Salah", "Watkins"]);
        assert_eq!(
            serde_json::to_string(&set).expect("encode pinned set"),
            r#"["Salah","Watkins"]"#
        );
    }

    #[test]
    fn strip_handles_glyph_and_whitespace() {
        assert_eq!(strip_pin_glyph("📌 Salah"), "Salah");
        assert_eq!(strip_pin_glyph("📌Salah"), "Salah");
        assert_eq!(strip_pin_glyph("  📌 📌 Salah "), "Salah");
        assert_eq!(strip_pin_glyph("Salah"), "Salah");
        assert_eq!(strip_pin_glyph(&pinned_label("Son")), "Son");
    }

    #[test]
    fn pin_request_wire_format() {
        let request = PinRequest {
            player_name: "Salah".to_string(),
            action: PinAction::Unpin,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("encode request"),
            serde_json::json!({"player_name": "Salah", "action": "unpin"})
        );
    }

    #[test]
    fn pin_response_tolerates_missing_fields() {
        let response: PinResponse =
            serde_json::from_str(r#"{"success":false,"error":"nope"}"#).expect("parse response");
        assert!(!response.success);
        assert!(response.pinned_players.is_empty());
        assert_eq!(response.error.as_deref(), Some("nope"));

        let ok = PinResponse::ok(&PinnedSet::from(vec!["Isak".to_string()]));
        let encoded = serde_json::to_value(&ok).expect("encode response");
        assert_eq!(
            encoded,
            serde_json::json!({"success": true, "pinned_players": ["Isak"]})
        );
    }
}
