//! Leading-edge throttled autosave.
//!
//! The first change in a quiet period arms a timer for the fixed window;
//! changes while it is pending are dropped, not queued. When the timer fires
//! the dispatcher reads whatever text is current at that moment, so edits made
//! inside one window may be saved up to one window late.

use std::future::Future;
use std::time::Duration;

use crate::document::DocumentPath;
use crate::envelope::Request;
use crate::platform::Runtime;
use crate::timer::{Ticket, TimerSlot};

/// Form field carrying the document text.
const TEXT_FIELD: &str = "t";

#[derive(Debug)]
pub struct AutosaveChannel {
    window: Duration,
    slot: TimerSlot,
}

impl AutosaveChannel {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: TimerSlot::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// Arm the window unless one is already pending.
    ///
    /// `dispatch` runs once the window elapses and should call
    /// [`release`](Self::release) with its ticket before issuing the save.
    /// Returns whether a dispatch was scheduled.
    pub fn trigger<R, F, D>(&self, runtime: &R, dispatch: D) -> bool
    where
        R: Runtime,
        F: Future<Output = ()> + 'static,
        D: FnOnce(Ticket) -> F + 'static,
    {
        if self.slot.is_pending() {
            tracing::trace!("autosave window pending, change coalesced");
            return false;
        }

        let delay = runtime.sleep(self.window);
        let task = self.slot.arm(move |ticket| async move {
            delay.await;
            dispatch(ticket).await;
        });
        runtime.spawn(task);
        tracing::debug!(window_ms = self.window.as_millis() as u64, "autosave scheduled");
        true
    }

    pub fn release(&self, ticket: Ticket) -> bool {
        self.slot.release(ticket)
    }
}

/// Form-encoded save of the whole document to its own path.
pub fn save_request(path: &DocumentPath, text: &str) -> Request {
    Request::form(path.endpoint(""), vec![(TEXT_FIELD, text.to_string())])
}
