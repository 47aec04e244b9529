//! Discrete setting changes and the password gate.
//!
//! Every setting is sent once per user action and only takes visible effect
//! after the server confirms it.

use serde_json::{Value, json};

use crate::document::{DocumentPath, RenderMode, ShareLink};
use crate::envelope::Request;
use crate::error::ControllerError;

const PASSWORD_ENDPOINT: &str = "/pw";
const SETTING_ENDPOINT: &str = "/setting";
const AUTH_ENDPOINT: &str = "/auth";

/// A setting change requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// New password as typed. Blank after trimming removes the password.
    Password(String),
    RenderMode(RenderMode),
    Share(bool),
}

/// What to do after the server confirmed a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingOutcome {
    PasswordSet,
    PasswordRemoved,
    /// The new render mode is picked up from a fresh page load.
    Reload,
    ShareEnabled(ShareLink),
    ShareDisabled,
}

impl Setting {
    pub fn request(&self, path: &DocumentPath) -> Request {
        match self {
            Setting::Password(passwd) => Request::json(
                path.endpoint(PASSWORD_ENDPOINT),
                json!({ "passwd": passwd.trim() }),
            ),
            Setting::RenderMode(mode) => Request::json(
                path.endpoint(SETTING_ENDPOINT),
                json!({ "mode": mode.wire_name() }),
            ),
            Setting::Share(enabled) => Request::json(
                path.endpoint(SETTING_ENDPOINT),
                json!({ "share": enabled }),
            ),
        }
    }

    /// Interpret the `data` of a successful envelope.
    pub fn confirm(&self, data: Option<Value>, origin: &str) -> Result<SettingOutcome, ControllerError> {
        match self {
            Setting::Password(passwd) if passwd.trim().is_empty() => {
                Ok(SettingOutcome::PasswordRemoved)
            }
            Setting::Password(_) => Ok(SettingOutcome::PasswordSet),
            Setting::RenderMode(_) => Ok(SettingOutcome::Reload),
            Setting::Share(false) => Ok(SettingOutcome::ShareDisabled),
            Setting::Share(true) => {
                let token = data
                    .as_ref()
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .ok_or(ControllerError::MissingShareToken)?;
                Ok(SettingOutcome::ShareEnabled(ShareLink::new(origin, token)))
            }
        }
    }
}

/// Password gate submission for a protected document.
pub fn unlock_request(path: &DocumentPath, passwd: &str) -> Request {
    Request::json(path.endpoint(AUTH_ENDPOINT), json!({ "passwd": passwd }))
}

/// Whether a successful unlock response asks for a reload.
pub fn unlock_needs_reload(data: Option<&Value>) -> bool {
    data.and_then(|d| d.get("refresh"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
