//! Browser clipboard writes.
//!
//! Uses the async Clipboard API, which doesn't require a clipboard event and
//! so works from a plain button click.

use wasm_bindgen::JsValue;
use web_sys::Window;

/// Write `text` to the system clipboard in the background.
pub fn write_text(window: &Window, text: &str) {
    let clipboard = window.navigator().clipboard();
    let promise = clipboard.write_text(text);
    let len = text.len();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = write(promise).await {
            tracing::warn!("Clipboard write failed: {:?}", e);
        } else {
            tracing::debug!("Wrote {} bytes to clipboard", len);
        }
    });
}

async fn write(promise: js_sys::Promise) -> Result<(), JsValue> {
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}
