//! Owned, cancelable scheduled tasks.
//!
//! A `TimerSlot` holds at most one pending task. Arming a slot aborts
//! whatever it held before, so two callbacks for the same effect can never
//! both fire.

use std::cell::{Cell, RefCell};
use std::future::Future;

use futures_util::future::{AbortHandle, abortable};

/// Identifies one arming of a slot. Used by the task itself to release the
/// slot when it fires, without clobbering a newer arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: RefCell<Option<(Ticket, AbortHandle)>>,
    generation: Cell<u64>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Abort the pending task, if any. Returns whether one was pending.
    pub fn cancel_if_pending(&self) -> bool {
        match self.pending.borrow_mut().take() {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Replace the slot's task with the one built by `make`.
    ///
    /// The returned future must be spawned by the caller. It resolves early,
    /// without running the rest of the task, if the slot is cancelled or re-armed.
    pub fn arm<F, M>(&self, make: M) -> impl Future<Output = ()> + use<F, M>
    where
        F: Future<Output = ()>,
        M: FnOnce(Ticket) -> F,
    {
        self.cancel_if_pending();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let ticket = Ticket(generation);

        let (task, handle) = abortable(make(ticket));
        *self.pending.borrow_mut() = Some((ticket, handle));

        async move {
            let _ = task.await;
        }
    }

    /// Mark the task for `ticket` as fired. Stale tickets are ignored.
    pub fn release(&self, ticket: Ticket) -> bool {
        let mut pending = self.pending.borrow_mut();
        match pending.as_ref() {
            Some((current, _)) if *current == ticket => {
                *pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel_if_pending();
    }
}
