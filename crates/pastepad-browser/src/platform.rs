//! Browser implementation of the controller's platform traits.

use std::future::Future;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use pastepad_core::{
    ClipboardWriter, ControllerError, EditorSurface, Envelope, HttpClient, Notifier, RenderMode,
    Request, RequestBody, Router, Runtime, SafeHtml, ShareLink, UserPrompt,
};
use web_sys::Window;

use crate::controls::{COPIED_BACKGROUND, Controls, set_display};

/// Binds the platform traits to `window` and the located page controls.
pub struct BrowserPlatform {
    window: Window,
    controls: Controls,
    client: reqwest::Client,
}

impl BrowserPlatform {
    pub fn new(window: Window, controls: Controls) -> Self {
        Self {
            window,
            controls,
            client: reqwest::Client::new(),
        }
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }
}

impl HttpClient for BrowserPlatform {
    async fn post(&self, request: Request) -> Result<Envelope, ControllerError> {
        // reqwest needs an absolute URL on wasm.
        let url = format!("{}{}", self.origin(), request.path);
        let builder = self.client.post(&url);
        let builder = match &request.body {
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Json(body) => builder.json(body),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))?;
        Envelope::from_json(&body)
    }
}

impl UserPrompt for BrowserPlatform {
    fn prompt(&self, message: &str) -> Option<String> {
        self.window.prompt_with_message(message).ok().flatten()
    }
}

impl Notifier for BrowserPlatform {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!("alert failed: {:?}", e);
        }
    }
}

impl ClipboardWriter for BrowserPlatform {
    fn write_text(&self, text: &str) {
        crate::clipboard::write_text(&self.window, text);
    }
}

impl Router for BrowserPlatform {
    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            tracing::warn!("reload failed: {:?}", e);
        }
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            tracing::warn!("navigation to {} failed: {:?}", path, e);
        }
    }
}

impl EditorSurface for BrowserPlatform {
    fn current_text(&self) -> String {
        self.controls.text()
    }

    fn show_preview(&self, pane: RenderMode, html: &SafeHtml) {
        let target = match pane {
            RenderMode::Plain => &self.controls.preview_plain,
            RenderMode::Markdown => &self.controls.preview_markdown,
        };
        if let Some(node) = target {
            node.set_inner_html(html.as_str());
        }
    }

    fn set_loading(&self, visible: bool) {
        if let Some(loading) = &self.controls.loading {
            set_display(loading, if visible { "inline-block" } else { "none" });
        }
    }

    fn show_share_modal(&self, link: &ShareLink) {
        if let Some(input) = &self.controls.share_input {
            input.set_value(&link.url);
        }
        if let Some(modal) = &self.controls.share_modal {
            set_display(modal, "block");
        }
    }

    fn hide_share_modal(&self) {
        if let Some(modal) = &self.controls.share_modal {
            set_display(modal, "none");
        }
    }

    fn set_copy_feedback(&self, label: Option<&str>) {
        let Some(button) = &self.controls.copy_button else {
            return;
        };
        let style = button.style();
        let result = match label {
            Some(label) => {
                button.set_text_content(Some(label));
                style.set_property("background", COPIED_BACKGROUND)
            }
            None => {
                button.set_inner_html(&self.controls.copy_label);
                style.set_property("background", &self.controls.copy_background)
            }
        };
        if let Err(e) = result {
            tracing::debug!("failed to style copy button: {:?}", e);
        }
    }
}

impl Runtime for BrowserPlatform {
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
