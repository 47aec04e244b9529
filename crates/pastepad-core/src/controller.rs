//! The controller wires user actions to the renderer, the autosave channel,
//! the settings channel and the share flow.
//!
//! Every server call goes through the same path: decode the envelope, branch
//! on `err`, then either apply the effect or alert the message. Nothing is
//! retried and nothing is mutated optimistically.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::autosave::{self, AutosaveChannel};
use crate::config::EditorConfig;
use crate::document::{Document, DocumentPath, RenderMode, ShareLink};
use crate::envelope::Request;
use crate::error::ControllerError;
use crate::i18n::{Locale, Messages};
use crate::platform::Platform;
use crate::render::render;
use crate::settings::{self, Setting, SettingOutcome};
use crate::share::{ShareFlow, ShareState};
use crate::timer::TimerSlot;

/// Editor controller, generic over the platform it runs on.
///
/// Cheap to clone; clones share state. Spawned tasks hold a clone, so state
/// lives until the last pending timer or request completes.
pub struct Controller<P: Platform> {
    inner: Rc<Inner<P>>,
}

impl<P: Platform> Clone for Controller<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<P> {
    platform: P,
    config: EditorConfig,
    messages: &'static Messages,
    document: RefCell<Document>,
    autosave: AutosaveChannel,
    share: RefCell<ShareFlow>,
    copy_feedback: TimerSlot,
}

impl<P: Platform> Controller<P> {
    pub fn new(platform: P, config: EditorConfig, locale: Locale, document: Document) -> Self {
        let autosave = AutosaveChannel::new(config.autosave_window());
        Self {
            inner: Rc::new(Inner {
                platform,
                messages: locale.messages(),
                config,
                document: RefCell::new(document),
                autosave,
                share: RefCell::new(ShareFlow::default()),
                copy_feedback: TimerSlot::new(),
            }),
        }
    }

    pub fn platform(&self) -> &P {
        &self.inner.platform
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn messages(&self) -> &'static Messages {
        self.inner.messages
    }

    pub fn document(&self) -> Document {
        self.inner.document.borrow().clone()
    }

    pub fn share_state(&self) -> ShareState {
        self.inner.share.borrow().state()
    }

    pub fn autosave_pending(&self) -> bool {
        self.inner.autosave.is_pending()
    }

    /// Populate both preview panes from the loaded text.
    pub fn load(&self) {
        let text = self.inner.document.borrow().text.clone();
        for pane in [RenderMode::Plain, RenderMode::Markdown] {
            self.inner.platform.show_preview(pane, &render(pane, &text));
        }
    }

    /// Called on every keystroke.
    ///
    /// The Markdown preview is re-rendered immediately; the save goes through
    /// the throttle.
    pub fn content_changed(&self) {
        self.inner.sync_text();

        let inner = self.inner.clone();
        self.inner
            .autosave
            .trigger(&self.inner.platform, move |ticket| async move {
                inner.autosave.release(ticket);
                inner.save().await;
            });
    }

    /// Prompt for a new password and send it.
    ///
    /// A blank answer is warned about, then still sent: an empty password
    /// is how the current one is removed.
    pub async fn change_password(&self) {
        let messages = self.inner.messages;
        let Some(passwd) = self.inner.platform.prompt(messages.enter_new_password) else {
            return;
        };
        if passwd.trim().is_empty() {
            self.inner.platform.alert(messages.password_empty);
        }
        self.run(Setting::Password(passwd)).await;
    }

    pub async fn set_render_mode(&self, mode: RenderMode) {
        self.run(Setting::RenderMode(mode)).await;
    }

    pub async fn set_share(&self, enabled: bool) {
        self.run(Setting::Share(enabled)).await;
    }

    /// Send one setting and apply its effect once confirmed.
    pub async fn apply_setting(&self, setting: Setting) -> Result<SettingOutcome, ControllerError> {
        let data = self.inner.send(setting.request(&self.inner.path())).await?;
        let outcome = setting.confirm(data, &self.inner.platform.origin())?;
        tracing::info!(?outcome, "setting confirmed");
        self.apply_outcome(&outcome);
        Ok(outcome)
    }

    /// Password gate for a protected document.
    pub async fn unlock(&self) {
        let messages = self.inner.messages;
        let Some(passwd) = self.inner.platform.prompt(messages.enter_password) else {
            return;
        };
        if passwd.trim().is_empty() {
            self.inner.platform.alert(messages.password_empty);
            return;
        }

        let request = settings::unlock_request(&self.inner.path(), &passwd);
        match self.inner.send(request).await {
            Ok(data) => {
                if settings::unlock_needs_reload(data.as_ref()) {
                    self.inner.platform.reload();
                }
            }
            Err(e) => self.inner.report(&e),
        }
    }

    /// Navigate from `/share/<token>` to its raw source.
    pub fn view_raw(&self) {
        match self.inner.path().raw_view() {
            Ok(raw) => self.inner.platform.navigate(&raw),
            Err(e) => self.inner.report(&e),
        }
    }

    pub fn close_share(&self) {
        if !self.inner.share.borrow_mut().close() {
            return;
        }
        if self.inner.copy_feedback.cancel_if_pending() {
            self.inner.platform.set_copy_feedback(None);
        }
        self.inner.platform.hide_share_modal();
    }

    /// Copy the link and show the confirmation; the modal closes once it
    /// elapses. Copying again restarts the confirmation.
    pub fn copy_share_link(&self) {
        let Some(url) = self.inner.share.borrow_mut().copy().map(|l| l.url.clone()) else {
            return;
        };
        let platform = &self.inner.platform;
        platform.write_text(&url);
        platform.set_copy_feedback(Some(self.inner.messages.copied));

        let inner = self.inner.clone();
        let delay = platform.sleep(self.inner.config.copy_feedback());
        let task = self.inner.copy_feedback.arm(move |ticket| async move {
            delay.await;
            inner.copy_feedback.release(ticket);
            if inner.share.borrow_mut().confirmation_elapsed() {
                inner.platform.hide_share_modal();
            }
            inner.platform.set_copy_feedback(None);
        });
        platform.spawn(task);
    }

    async fn run(&self, setting: Setting) {
        if let Err(e) = self.apply_setting(setting).await {
            self.inner.report(&e);
        }
    }

    fn apply_outcome(&self, outcome: &SettingOutcome) {
        let platform = &self.inner.platform;
        let messages = self.inner.messages;
        match outcome {
            SettingOutcome::PasswordSet => platform.alert(messages.password_set),
            SettingOutcome::PasswordRemoved => platform.alert(messages.password_removed),
            SettingOutcome::Reload => platform.reload(),
            SettingOutcome::ShareEnabled(link) => self.open_share(link.clone()),
            SettingOutcome::ShareDisabled => {}
        }
    }

    fn open_share(&self, link: ShareLink) {
        if self.inner.copy_feedback.cancel_if_pending() {
            self.inner.platform.set_copy_feedback(None);
        }
        self.inner.platform.show_share_modal(&link);
        self.inner.share.borrow_mut().open(link);
    }
}

impl<P: Platform> Inner<P> {
    fn path(&self) -> DocumentPath {
        DocumentPath::new(self.platform.path())
    }

    /// Read the input into the document and re-render the Markdown preview,
    /// plus the plain preview when that is the active mode.
    fn sync_text(&self) -> String {
        let text = self.platform.current_text();
        let mode = {
            let mut doc = self.document.borrow_mut();
            doc.text.clone_from(&text);
            doc.render_mode
        };
        if mode == RenderMode::Plain {
            self.platform
                .show_preview(RenderMode::Plain, &render(RenderMode::Plain, &text));
        }
        self.platform
            .show_preview(RenderMode::Markdown, &render(RenderMode::Markdown, &text));
        text
    }

    async fn save(&self) {
        let text = self.sync_text();
        self.platform.set_loading(true);
        let result = self
            .send(autosave::save_request(&self.path(), &text))
            .await;
        if let Err(e) = result {
            self.report(&e);
        }
        self.platform.set_loading(false);
    }

    async fn send(&self, request: Request) -> Result<Option<Value>, ControllerError> {
        tracing::debug!(path = %request.path, "sending request");
        self.platform.post(request).await?.into_result()
    }

    fn report(&self, error: &ControllerError) {
        tracing::warn!(%error, "request failed");
        self.platform.alert(&error.alert_text(self.messages));
    }
}
