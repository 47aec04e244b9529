use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ControllerError;
use crate::i18n::Locale;

/// Timing and locale settings for a controller instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Throttle window for autosave dispatches.
    pub autosave_window_ms: u64,
    /// How long the "copied" confirmation stays before the share modal closes.
    pub copy_feedback_ms: u64,
    /// Locale used when the browser preference is unsupported.
    pub default_locale: Locale,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_window_ms: 1000,
            copy_feedback_ms: 1500,
            default_locale: Locale::En,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ControllerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn autosave_window(&self) -> Duration {
        Duration::from_millis(self.autosave_window_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}
