//! Browser DOM layer for the pastepad editor.
//!
//! This crate binds the `pastepad-core` platform traits to browser APIs and
//! wires the page's controls to a `Controller`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `controls`: optional page elements, located once at mount
//! - `platform`: `fetch` via reqwest, dialogs, location, display surface
//! - `clipboard`: async Clipboard API writes
//! - `mount`: controller construction and event listeners

pub use pastepad_core;

pub mod clipboard;
pub mod controls;
pub mod mount;
pub mod platform;

pub use controls::Controls;
pub use mount::{BrowserController, mount};
pub use platform::BrowserPlatform;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static CONTROLLER: RefCell<Option<BrowserController>> = const { RefCell::new(None) };
}

/// Module entry point: install logging, then mount once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        gloo_events::EventListener::once(&document, "DOMContentLoaded", move |_| {
            install(window);
        })
        .forget();
    } else {
        install(window);
    }
}

/// Prompt for the document password. For pages that trigger the gate from
/// their own script instead of a `.opt-auth` button.
#[wasm_bindgen(js_name = promptPassword)]
pub fn prompt_password() {
    let controller = CONTROLLER.with(|c| c.borrow().clone());
    match controller {
        Some(ctl) => wasm_bindgen_futures::spawn_local(async move { ctl.unlock().await }),
        None => tracing::warn!("promptPassword called before the editor was mounted"),
    }
}

fn install(window: web_sys::Window) {
    let controller = mount(window);
    if controller.is_some() {
        tracing::info!("pastepad editor mounted");
    }
    CONTROLLER.with(|c| *c.borrow_mut() = controller);
}

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // reqwest and its internals are noisy at debug.
    let filter = EnvFilter::new("debug,reqwest=info");

    let reg = Registry::default().with(filter).with(wasm_layer);

    let _ = set_global_default(reg);
}
