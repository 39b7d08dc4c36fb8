use serde::{Deserialize, Serialize};

fn default_status_messages() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Print transient status lines (copy feedback, acquisition errors).
    #[serde(default = "default_status_messages")]
    pub status_messages: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_messages: default_status_messages(),
        }
    }
}
