//! Builds the controller from the page and attaches DOM listeners.

use std::future::Future;

use gloo_events::EventListener;
use pastepad_core::{Controller, Document, EditorConfig, Locale, RenderMode};
use web_sys::{EventTarget, Window};

use crate::controls::Controls;
use crate::platform::BrowserPlatform;

/// Attribute on `<body>` marking a password-protected document.
const LOCKED_ATTR: &str = "data-locked";

pub type BrowserController = Controller<BrowserPlatform>;

/// Locate controls, render the initial previews and wire every control
/// present on the page.
pub fn mount(window: Window) -> Option<BrowserController> {
    let dom = window.document()?;
    let controls = Controls::locate(&dom);
    let config = load_config(&controls);
    let locale = Locale::resolve(window.navigator().language().as_deref(), config.default_locale);
    tracing::debug!(locale = locale.tag(), "resolved locale");

    let document = Document::new(
        controls.text(),
        RenderMode::from_markdown_flag(controls.markdown_enabled()),
    );
    let controller = Controller::new(
        BrowserPlatform::new(window, controls.clone()),
        config,
        locale,
        document,
    );
    controller.load();
    attach(&controller, &controls);

    let locked = dom.body().is_some_and(|b| b.has_attribute(LOCKED_ATTR));
    if locked {
        spawn(&controller, |ctl| async move { ctl.unlock().await });
    }

    Some(controller)
}

fn load_config(controls: &Controls) -> EditorConfig {
    let Some(json) = controls.config_json() else {
        return EditorConfig::default();
    };
    EditorConfig::from_json(&json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring malformed editor config");
        EditorConfig::default()
    })
}

fn attach(controller: &BrowserController, controls: &Controls) {
    if let Some(contents) = &controls.contents {
        let ctl = controller.clone();
        listen(contents, "input", move || ctl.content_changed());
    }

    if let Some(button) = &controls.password_button {
        let ctl = controller.clone();
        listen(button, "click", move || {
            spawn(&ctl, |ctl| async move { ctl.change_password().await })
        });
    }

    if let Some(button) = &controls.unlock_button {
        let ctl = controller.clone();
        listen(button, "click", move || {
            spawn(&ctl, |ctl| async move { ctl.unlock().await })
        });
    }

    if let Some(button) = &controls.raw_button {
        let ctl = controller.clone();
        listen(button, "click", move || ctl.view_raw());
    }

    if let Some(toggle) = &controls.mode_toggle {
        let ctl = controller.clone();
        let input = toggle.clone();
        listen(toggle, "click", move || {
            let mode = RenderMode::from_markdown_flag(input.checked());
            spawn(&ctl, move |ctl| async move { ctl.set_render_mode(mode).await })
        });
    }

    if let Some(toggle) = &controls.share_toggle {
        let ctl = controller.clone();
        let input = toggle.clone();
        listen(toggle, "click", move || {
            let enabled = input.checked();
            spawn(&ctl, move |ctl| async move { ctl.set_share(enabled).await })
        });
    }

    if controls.share_modal.is_some() {
        if let Some(button) = &controls.close_button {
            let ctl = controller.clone();
            listen(button, "click", move || ctl.close_share());
        }
        if let Some(button) = &controls.copy_button {
            let ctl = controller.clone();
            listen(button, "click", move || ctl.copy_share_link());
        }
    }
}

/// Attach a listener for the lifetime of the page.
fn listen<F>(target: &EventTarget, event: &'static str, mut handler: F)
where
    F: FnMut() + 'static,
{
    EventListener::new(target, event, move |_| handler()).forget();
}

fn spawn<M, F>(controller: &BrowserController, make: M)
where
    M: FnOnce(BrowserController) -> F,
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(make(controller.clone()));
}
