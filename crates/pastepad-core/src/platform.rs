//! Platform abstraction traits for the controller.
//!
//! These traits define the interface between controller logic and the
//! environment it runs in. The browser implementation in `pastepad-browser`
//! binds them to `fetch`, `alert`, `prompt`, the clipboard and the DOM; tests
//! bind them to in-memory fakes.
//!
//! Everything runs on a single thread, so none of the futures here are `Send`.

use std::future::Future;
use std::time::Duration;

use crate::document::{RenderMode, ShareLink};
use crate::envelope::{Envelope, Request};
use crate::error::ControllerError;
use crate::render::SafeHtml;

/// Sends requests to the document server.
pub trait HttpClient {
    /// POST `request` and decode the response envelope.
    ///
    /// Network failures and unreadable bodies are `ControllerError::Transport`.
    /// A decoded envelope is returned as-is, whatever its `err` value.
    fn post(&self, request: Request) -> impl Future<Output = Result<Envelope, ControllerError>>;
}

/// Blocking text prompt.
pub trait UserPrompt {
    /// Returns `None` when the user cancels.
    fn prompt(&self, message: &str) -> Option<String>;
}

/// Blocking message dialog.
pub trait Notifier {
    fn alert(&self, message: &str);
}

pub trait ClipboardWriter {
    fn write_text(&self, text: &str);
}

/// Current location and navigation.
pub trait Router {
    /// Location path of the current document, e.g. `/abc`.
    fn path(&self) -> String;

    /// Scheme, host and port, e.g. `https://x.test`.
    fn origin(&self) -> String;

    fn reload(&self);

    fn navigate(&self, path: &str);
}

/// The editor's display surface.
///
/// Implementations silently skip controls that are not present.
pub trait EditorSurface {
    /// Current contents of the text input.
    fn current_text(&self) -> String;

    fn show_preview(&self, pane: RenderMode, html: &SafeHtml);

    fn set_loading(&self, visible: bool);

    fn show_share_modal(&self, link: &ShareLink);

    fn hide_share_modal(&self);

    /// `Some(label)` shows the copy confirmation, `None` restores the button.
    fn set_copy_feedback(&self, label: Option<&str>);
}

/// Task spawning and delays on the local thread.
pub trait Runtime {
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static;
}

/// Every capability the controller needs.
pub trait Platform:
    HttpClient + UserPrompt + Notifier + ClipboardWriter + Router + EditorSurface + Runtime + 'static
{
}

impl<T> Platform for T where
    T: HttpClient
        + UserPrompt
        + Notifier
        + ClipboardWriter
        + Router
        + EditorSurface
        + Runtime
        + 'static
{
}
