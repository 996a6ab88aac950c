use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGE: &str = "Hello, world!";

/// Payload of the message echo endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}
