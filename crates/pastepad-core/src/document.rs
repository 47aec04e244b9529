//! The edited document and the address space derived from its location path.

use serde::{Deserialize, Serialize};

use crate::error::ControllerError;

const SHARE_PREFIX: &str = "/share/";
const RAW_PREFIX: &str = "/raw/";

/// How the document is previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "md")]
    Markdown,
}

impl RenderMode {
    /// Value sent in the `/setting` body.
    pub fn wire_name(self) -> &'static str {
        match self {
            RenderMode::Plain => "plain",
            RenderMode::Markdown => "md",
        }
    }

    pub fn from_markdown_flag(is_markdown: bool) -> Self {
        if is_markdown {
            RenderMode::Markdown
        } else {
            RenderMode::Plain
        }
    }
}

/// Local editor state.
///
/// Text changes only through keystrokes. The render mode is fixed for the
/// lifetime of a page load; a confirmed mode change reloads instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub render_mode: RenderMode,
}

impl Document {
    pub fn new(text: impl Into<String>, render_mode: RenderMode) -> Self {
        Self {
            text: text.into(),
            render_mode,
        }
    }
}

/// The document's location path; every endpoint is addressed relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath(String);

impl DocumentPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a sub-resource, e.g. `endpoint("/pw")`. An empty suffix is the document itself.
    pub fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }

    /// Rewrite `/share/<token>` to `/raw/<token>`.
    pub fn raw_view(&self) -> Result<String, ControllerError> {
        self.0
            .strip_prefix(SHARE_PREFIX)
            .map(|token| format!("{RAW_PREFIX}{token}"))
            .ok_or_else(|| ControllerError::NotShared {
                path: self.0.clone(),
            })
    }
}

/// Public link to a shared copy of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
}

impl ShareLink {
    pub fn new(origin: &str, token: &str) -> Self {
        Self {
            url: format!("{}{}{}", origin.trim_end_matches('/'), SHARE_PREFIX, token),
        }
    }
}
