//! Controller tests against an in-memory platform.
//!
//! Time is paused, so sleeps advance the clock instantly and timers fire in
//! deadline order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use pastepad_core::{
    ClipboardWriter, Controller, ControllerError, Document, EditorConfig, EditorSurface, Envelope,
    HttpClient, Locale, Notifier, RenderMode, Request, RequestBody, Router, Runtime, SafeHtml,
    ShareLink, ShareState, UserPrompt,
};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
enum ModalEvent {
    Shown(String),
    Hidden,
}

struct FakePlatform {
    path: String,
    origin: String,
    text: RefCell<String>,
    prompts: RefCell<VecDeque<Option<String>>>,
    responses: RefCell<VecDeque<Result<Envelope, String>>>,
    requests: RefCell<Vec<Request>>,
    alerts: RefCell<Vec<String>>,
    clipboard: RefCell<Vec<String>>,
    reloads: Cell<usize>,
    navigations: RefCell<Vec<String>>,
    previews: RefCell<Vec<(RenderMode, String)>>,
    loading: RefCell<Vec<bool>>,
    modal: RefCell<Vec<ModalEvent>>,
    copy_feedback: RefCell<Vec<Option<String>>>,
}

impl FakePlatform {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            origin: "https://x.test".to_string(),
            text: RefCell::new(String::new()),
            prompts: RefCell::new(VecDeque::new()),
            responses: RefCell::new(VecDeque::new()),
            requests: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            clipboard: RefCell::new(Vec::new()),
            reloads: Cell::new(0),
            navigations: RefCell::new(Vec::new()),
            previews: RefCell::new(Vec::new()),
            loading: RefCell::new(Vec::new()),
            modal: RefCell::new(Vec::new()),
            copy_feedback: RefCell::new(Vec::new()),
        }
    }

    fn type_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn answer_prompt(&self, answer: Option<&str>) {
        self.prompts
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    fn respond(&self, envelope: Envelope) {
        self.responses.borrow_mut().push_back(Ok(envelope));
    }

    fn fail_transport(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(message.to_string()));
    }
}

impl HttpClient for FakePlatform {
    async fn post(&self, request: Request) -> Result<Envelope, ControllerError> {
        self.requests.borrow_mut().push(request);
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Envelope::ok(None)));
        tokio::task::yield_now().await;
        response.map_err(ControllerError::Transport)
    }
}

impl UserPrompt for FakePlatform {
    fn prompt(&self, _message: &str) -> Option<String> {
        self.prompts.borrow_mut().pop_front().flatten()
    }
}

impl Notifier for FakePlatform {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

impl ClipboardWriter for FakePlatform {
    fn write_text(&self, text: &str) {
        self.clipboard.borrow_mut().push(text.to_string());
    }
}

impl Router for FakePlatform {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_string());
    }
}

impl EditorSurface for FakePlatform {
    fn current_text(&self) -> String {
        self.text.borrow().clone()
    }

    fn show_preview(&self, pane: RenderMode, html: &SafeHtml) {
        self.previews
            .borrow_mut()
            .push((pane, html.as_str().to_string()));
    }

    fn set_loading(&self, visible: bool) {
        self.loading.borrow_mut().push(visible);
    }

    fn show_share_modal(&self, link: &ShareLink) {
        self.modal
            .borrow_mut()
            .push(ModalEvent::Shown(link.url.clone()));
    }

    fn hide_share_modal(&self) {
        self.modal.borrow_mut().push(ModalEvent::Hidden);
    }

    fn set_copy_feedback(&self, label: Option<&str>) {
        self.copy_feedback
            .borrow_mut()
            .push(label.map(str::to_string));
    }
}

impl Runtime for FakePlatform {
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        tokio::time::sleep(duration)
    }
}

fn run<F: Future>(test: F) -> F::Output {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    tokio::task::LocalSet::new().block_on(&rt, test)
}

fn controller(path: &str, mode: RenderMode) -> Controller<FakePlatform> {
    Controller::new(
        FakePlatform::new(path),
        EditorConfig::default(),
        Locale::En,
        Document::new("", mode),
    )
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// === Rendering ===

#[test]
fn test_load_renders_both_panes_sanitized() {
    let ctl = Controller::new(
        FakePlatform::new("/doc"),
        EditorConfig::default(),
        Locale::En,
        Document::new("# Hi <script>alert(1)</script>", RenderMode::Markdown),
    );
    ctl.load();

    let previews = ctl.platform().previews.borrow();
    assert_eq!(previews.len(), 2);
    assert_eq!(previews[0].0, RenderMode::Plain);
    assert_eq!(previews[1].0, RenderMode::Markdown);
    assert!(previews.iter().all(|(_, html)| !html.contains("<script")));
    assert!(previews[1].1.contains("<h1>"));
}

// === Autosave ===

#[test]
fn test_burst_within_window_dispatches_once() {
    run(async {
        let ctl = controller("/doc", RenderMode::Markdown);
        let p = ctl.platform();

        let mut typed = String::new();
        for c in "hello".chars() {
            typed.push(c);
            p.type_text(&typed);
            ctl.content_changed();
            advance(100).await;
        }
        assert!(ctl.autosave_pending());
        assert!(p.requests.borrow().is_empty());

        advance(600).await;

        let requests = p.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/doc");
        assert_eq!(
            requests[0].body,
            RequestBody::Form(vec![("t", "hello".to_string())])
        );
        assert!(!ctl.autosave_pending());
        assert_eq!(*p.loading.borrow(), vec![true, false]);
        assert!(p.alerts.borrow().is_empty());
    });
}

#[test]
fn test_preview_rerenders_on_every_keystroke() {
    run(async {
        let ctl = controller("/doc", RenderMode::Markdown);
        let p = ctl.platform();

        p.type_text("*a*");
        ctl.content_changed();
        p.type_text("*ab*");
        ctl.content_changed();

        {
            let previews = p.previews.borrow();
            assert_eq!(previews.len(), 2);
            assert!(previews[1].1.contains("<em>ab</em>"));
        }
        assert_eq!(ctl.document().text, "*ab*");
    });
}

#[test]
fn test_plain_keystroke_refreshes_both_panes() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.type_text("# Title");
        ctl.content_changed();

        let previews = p.previews.borrow();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0], (RenderMode::Plain, "# Title".to_string()));
        assert_eq!(previews[1], (RenderMode::Markdown, "<h1>Title</h1>\n".to_string()));
    });
}

#[test]
fn test_next_window_after_dispatch() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.type_text("one");
        ctl.content_changed();
        advance(1100).await;

        p.type_text("two");
        ctl.content_changed();
        advance(1100).await;

        let requests = p.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].body,
            RequestBody::Form(vec![("t", "two".to_string())])
        );
    });
}

#[test]
fn test_autosave_failure_alerts_and_keeps_text() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.respond(Envelope::failure(5, "boom"));

        p.type_text("draft");
        ctl.content_changed();
        advance(1100).await;

        assert_eq!(*p.alerts.borrow(), vec!["Error: boom".to_string()]);
        assert_eq!(*p.loading.borrow(), vec![true, false]);
        assert_eq!(ctl.document().text, "draft");
        assert_eq!(p.reloads.get(), 0);
    });
}

#[test]
fn test_transport_failure_alerts_raw_message() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.fail_transport("Failed to fetch");

        p.type_text("x");
        ctl.content_changed();
        advance(1100).await;

        assert_eq!(*p.alerts.borrow(), vec!["Error: Failed to fetch".to_string()]);
    });
}

// === Settings ===

#[test]
fn test_password_set_and_removed() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.answer_prompt(Some("hunter2"));
        ctl.change_password().await;
        p.answer_prompt(Some("   "));
        ctl.change_password().await;

        let requests = p.requests.borrow();
        assert_eq!(requests[0].path, "/doc/pw");
        assert_eq!(requests[0].body, RequestBody::Json(json!({"passwd": "hunter2"})));
        assert_eq!(requests[1].body, RequestBody::Json(json!({"passwd": ""})));
        assert_eq!(
            *p.alerts.borrow(),
            vec![
                "Password set successfully.".to_string(),
                "Password is empty!".to_string(),
                "Password removed successfully.".to_string()
            ]
        );
    });
}

#[test]
fn test_blank_new_password_warns_then_removes() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.answer_prompt(Some(""));
        ctl.change_password().await;

        let requests = p.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, RequestBody::Json(json!({"passwd": ""})));
        assert_eq!(
            *p.alerts.borrow(),
            vec![
                "Password is empty!".to_string(),
                "Password removed successfully.".to_string()
            ]
        );
    });
}

#[test]
fn test_password_prompt_cancelled() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.answer_prompt(None);
        ctl.change_password().await;
        assert!(p.requests.borrow().is_empty());
        assert!(p.alerts.borrow().is_empty());
    });
}

#[test]
fn test_unlock_empty_password_warns_without_request() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.answer_prompt(Some("  "));
        ctl.unlock().await;

        assert_eq!(*p.alerts.borrow(), vec!["Password is empty!".to_string()]);
        assert!(p.requests.borrow().is_empty());
    });
}

#[test]
fn test_unlock_reloads_only_on_refresh() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.answer_prompt(Some("pw"));
        p.respond(Envelope::ok(Some(json!({"refresh": false}))));
        ctl.unlock().await;
        assert_eq!(p.reloads.get(), 0);

        p.answer_prompt(Some("pw"));
        p.respond(Envelope::ok(Some(json!({"refresh": true}))));
        ctl.unlock().await;
        assert_eq!(p.reloads.get(), 1);

        assert_eq!(p.requests.borrow()[0].path, "/doc/auth");
        assert_eq!(
            p.requests.borrow()[0].body,
            RequestBody::Json(json!({"passwd": "pw"}))
        );
    });
}

#[test]
fn test_render_mode_change_reloads_without_patching() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        ctl.set_render_mode(RenderMode::Markdown).await;

        assert_eq!(p.reloads.get(), 1);
        assert!(p.previews.borrow().is_empty());
        assert_eq!(ctl.document().render_mode, RenderMode::Plain);
        assert_eq!(
            p.requests.borrow()[0].body,
            RequestBody::Json(json!({"mode": "md"}))
        );
    });
}

#[test]
fn test_share_enable_opens_modal_with_link() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.respond(Envelope::ok(Some(json!("abc123"))));

        ctl.set_share(true).await;

        assert_eq!(
            *p.modal.borrow(),
            vec![ModalEvent::Shown("https://x.test/share/abc123".to_string())]
        );
        assert_eq!(ctl.share_state(), ShareState::Visible);
    });
}

#[test]
fn test_share_enable_without_token_alerts_once() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        p.respond(Envelope::ok(None));

        ctl.set_share(true).await;

        assert_eq!(
            *p.alerts.borrow(),
            vec!["Error: share response did not contain a token".to_string()]
        );
        assert!(p.modal.borrow().is_empty());
        assert_eq!(ctl.share_state(), ShareState::Hidden);
        assert!(p.clipboard.borrow().is_empty());
    });
}

#[test]
fn test_share_disable_does_nothing_visible() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        ctl.set_share(false).await;

        assert_eq!(
            p.requests.borrow()[0].body,
            RequestBody::Json(json!({"share": false}))
        );
        assert!(p.modal.borrow().is_empty());
        assert!(p.alerts.borrow().is_empty());
    });
}

#[test]
fn test_protocol_error_from_every_endpoint_alerts_once() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();

        p.respond(Envelope::failure(5, "boom"));
        ctl.set_render_mode(RenderMode::Markdown).await;

        p.respond(Envelope::failure(5, "boom"));
        ctl.set_share(true).await;

        p.answer_prompt(Some("pw"));
        p.respond(Envelope::failure(5, "boom"));
        ctl.change_password().await;

        p.answer_prompt(Some("pw"));
        p.respond(Envelope::failure(5, "boom"));
        ctl.unlock().await;

        let alerts = p.alerts.borrow();
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().all(|a| a == "Error: boom"));
        assert_eq!(p.reloads.get(), 0);
        assert!(p.modal.borrow().is_empty());
        assert_eq!(ctl.share_state(), ShareState::Hidden);
    });
}

// === Share flow ===

async fn open_share(ctl: &Controller<FakePlatform>) {
    ctl.platform().respond(Envelope::ok(Some(json!("abc123"))));
    ctl.set_share(true).await;
}

#[test]
fn test_copy_closes_modal_after_confirmation() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        open_share(&ctl).await;

        ctl.copy_share_link();
        assert_eq!(ctl.share_state(), ShareState::Copied);
        assert_eq!(
            *p.clipboard.borrow(),
            vec!["https://x.test/share/abc123".to_string()]
        );
        assert_eq!(*p.copy_feedback.borrow(), vec![Some("Copied!".to_string())]);

        advance(1600).await;

        assert_eq!(ctl.share_state(), ShareState::Hidden);
        assert_eq!(p.modal.borrow().last(), Some(&ModalEvent::Hidden));
        assert_eq!(p.copy_feedback.borrow().last(), Some(&None));
    });
}

#[test]
fn test_second_copy_restarts_single_timer() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        open_share(&ctl).await;

        ctl.copy_share_link();
        advance(1000).await;
        ctl.copy_share_link();

        // The first confirmation would have elapsed here.
        advance(1000).await;
        assert_eq!(ctl.share_state(), ShareState::Copied);
        assert!(!p.modal.borrow().contains(&ModalEvent::Hidden));

        advance(600).await;
        assert_eq!(ctl.share_state(), ShareState::Hidden);
        let hides = p
            .modal
            .borrow()
            .iter()
            .filter(|e| **e == ModalEvent::Hidden)
            .count();
        assert_eq!(hides, 1);
        let restores = p.copy_feedback.borrow().iter().filter(|f| f.is_none()).count();
        assert_eq!(restores, 1);

        advance(5000).await;
        assert_eq!(p.modal.borrow().len(), 2);
    });
}

#[test]
fn test_close_hides_without_side_effects() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        open_share(&ctl).await;

        ctl.close_share();

        assert_eq!(ctl.share_state(), ShareState::Hidden);
        assert_eq!(p.modal.borrow().last(), Some(&ModalEvent::Hidden));
        assert!(p.clipboard.borrow().is_empty());
        assert!(p.copy_feedback.borrow().is_empty());

        ctl.copy_share_link();
        assert!(p.clipboard.borrow().is_empty());
    });
}

#[test]
fn test_close_while_copied_cancels_confirmation() {
    run(async {
        let ctl = controller("/doc", RenderMode::Plain);
        let p = ctl.platform();
        open_share(&ctl).await;

        ctl.copy_share_link();
        ctl.close_share();
        advance(2000).await;

        let hides = p
            .modal
            .borrow()
            .iter()
            .filter(|e| **e == ModalEvent::Hidden)
            .count();
        assert_eq!(hides, 1);
        assert_eq!(
            *p.copy_feedback.borrow(),
            vec![Some("Copied!".to_string()), None]
        );
    });
}

// === Raw view ===

#[test]
fn test_view_raw_from_share_page() {
    let ctl = controller("/share/abc123", RenderMode::Plain);
    ctl.view_raw();
    assert_eq!(
        *ctl.platform().navigations.borrow(),
        vec!["/raw/abc123".to_string()]
    );
}

#[test]
fn test_view_raw_outside_share_namespace() {
    let ctl = controller("/doc", RenderMode::Plain);
    ctl.view_raw();
    assert!(ctl.platform().navigations.borrow().is_empty());
    assert_eq!(
        *ctl.platform().alerts.borrow(),
        vec![Locale::En.messages().generic_error.to_string()]
    );
}
