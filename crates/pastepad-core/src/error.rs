//! Error types for controller operations.

use miette::Diagnostic;
use thiserror::Error;

use crate::i18n::Messages;

/// Errors surfaced to the user by the controller.
///
/// None of these are fatal; the user can always retry the triggering action.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ControllerError {
    /// The server answered with a non-zero `err` code.
    #[error("server error {code}: {message}")]
    #[diagnostic(code(pastepad::protocol))]
    Protocol { code: i64, message: String },

    /// The request never produced a readable envelope.
    #[error("transport error: {0}")]
    #[diagnostic(code(pastepad::transport))]
    Transport(String),

    /// Share was enabled but the response carried no token.
    #[error("share response did not contain a token")]
    #[diagnostic(code(pastepad::share_token))]
    MissingShareToken,

    /// Raw view requested for a document that is not under `/share/`.
    #[error("not a shared document: {path}")]
    #[diagnostic(
        code(pastepad::not_shared),
        help("raw view is only available from a /share/<token> page")
    )]
    NotShared { path: String },

    /// Embedded configuration could not be parsed.
    #[error(transparent)]
    #[diagnostic(code(pastepad::config))]
    Config(#[from] serde_json::Error),
}

impl ControllerError {
    /// Text shown in the alert dialog for this error.
    pub fn alert_text(&self, messages: &Messages) -> String {
        match self {
            ControllerError::Protocol { message, .. } => {
                format!("{}: {}", messages.error, message)
            }
            ControllerError::Transport(detail) => format!("{}: {}", messages.error, detail),
            ControllerError::MissingShareToken => format!("{}: {}", messages.error, self),
            ControllerError::NotShared { .. } => messages.generic_error.to_string(),
            ControllerError::Config(e) => format!("{}: {}", messages.error, e),
        }
    }
}
