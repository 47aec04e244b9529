//! Page controls the editor binds to.
//!
//! Every control is optional. A page without a share modal, say, simply never
//! gets share listeners; nothing here treats a missing element as an error.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

const CONTENTS: &str = "#contents";
const LOADING: &str = "#loading";
const PASSWORD_BUTTON: &str = ".opt-pw";
const UNLOCK_BUTTON: &str = ".opt-auth";
const RAW_BUTTON: &str = ".opt-raw";
const MODE_TOGGLE: &str = ".opt-mode > input";
const SHARE_TOGGLE: &str = ".opt-share > input";
const PREVIEW_PLAIN: &str = "#preview-plain";
const PREVIEW_MARKDOWN: &str = "#preview-md";
const SHARE_MODAL: &str = ".share-modal";
const CLOSE_BUTTON: &str = ".share-modal .close-btn";
const COPY_BUTTON: &str = ".share-modal .opt-button";
const SHARE_INPUT: &str = ".share-modal input";
const CONFIG_SCRIPT: &str = "#pastepad-config";

/// Background applied to the copy button while the confirmation shows.
pub const COPIED_BACKGROUND: &str = "orange";

#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub contents: Option<HtmlTextAreaElement>,
    pub loading: Option<HtmlElement>,
    pub password_button: Option<Element>,
    pub unlock_button: Option<Element>,
    pub raw_button: Option<Element>,
    pub mode_toggle: Option<HtmlInputElement>,
    pub share_toggle: Option<HtmlInputElement>,
    pub preview_plain: Option<Element>,
    pub preview_markdown: Option<Element>,
    pub share_modal: Option<HtmlElement>,
    pub close_button: Option<Element>,
    pub copy_button: Option<HtmlElement>,
    pub share_input: Option<HtmlInputElement>,
    pub config_script: Option<Element>,
    /// Copy button label and background as rendered by the page, restored
    /// after each confirmation.
    pub copy_label: String,
    pub copy_background: String,
}

impl Controls {
    pub fn locate(document: &Document) -> Self {
        let copy_button: Option<HtmlElement> = find(document, COPY_BUTTON);
        let (copy_label, copy_background) = copy_button
            .as_ref()
            .map(|b| {
                let background = b.style().get_property_value("background").unwrap_or_default();
                (b.inner_html(), background)
            })
            .unwrap_or_default();

        Self {
            contents: find(document, CONTENTS),
            loading: find(document, LOADING),
            password_button: find(document, PASSWORD_BUTTON),
            unlock_button: find(document, UNLOCK_BUTTON),
            raw_button: find(document, RAW_BUTTON),
            mode_toggle: find(document, MODE_TOGGLE),
            share_toggle: find(document, SHARE_TOGGLE),
            preview_plain: find(document, PREVIEW_PLAIN),
            preview_markdown: find(document, PREVIEW_MARKDOWN),
            share_modal: find(document, SHARE_MODAL),
            close_button: find(document, CLOSE_BUTTON),
            copy_button,
            share_input: find(document, SHARE_INPUT),
            config_script: find(document, CONFIG_SCRIPT),
            copy_label,
            copy_background,
        }
    }

    /// Text currently in the editor input.
    pub fn text(&self) -> String {
        self.contents.as_ref().map(|c| c.value()).unwrap_or_default()
    }

    pub fn markdown_enabled(&self) -> bool {
        self.mode_toggle.as_ref().is_some_and(|t| t.checked())
    }

    /// Raw JSON from the embedded config element, if the page has one.
    pub fn config_json(&self) -> Option<String> {
        self.config_script.as_ref().and_then(|s| s.text_content())
    }
}

fn find<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<T>().ok())
}

/// Set `display` on an element, ignoring style errors.
pub fn set_display(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("display", value) {
        tracing::debug!("failed to set display: {:?}", e);
    }
}
