//! pastepad-core: editor controller logic without DOM dependencies.
//!
//! This crate provides:
//! - `render` - plain and Markdown rendering, always sanitized into `SafeHtml`
//! - `autosave` - leading-edge throttled save channel
//! - `settings` - password, render mode and share toggles over the server envelope
//! - `share` - share-link modal state machine with a single copy-confirmation timer
//! - `Controller` - wires the above to injected platform capabilities
//!
//! Browser bindings for the platform traits live in `pastepad-browser`.

pub mod autosave;
pub mod config;
pub mod controller;
pub mod document;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod platform;
pub mod render;
pub mod settings;
pub mod share;
pub mod timer;

pub use autosave::AutosaveChannel;
pub use config::EditorConfig;
pub use controller::Controller;
pub use document::{Document, DocumentPath, RenderMode, ShareLink};
pub use envelope::{Envelope, Request, RequestBody};
pub use error::ControllerError;
pub use i18n::{Locale, Messages};
pub use platform::{
    ClipboardWriter, EditorSurface, HttpClient, Notifier, Platform, Router, Runtime, UserPrompt,
};
pub use render::{SafeHtml, render};
pub use settings::{Setting, SettingOutcome};
pub use share::{ShareFlow, ShareState};
pub use timer::TimerSlot;
