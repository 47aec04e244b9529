//! Share-link modal state machine.
//!
//! ```text
//! Hidden --open--> Visible --copy--> Copied --elapsed--> Hidden
//!                  Visible --close--> Hidden
//! ```
//!
//! The copy-confirmation timer itself is owned by the controller; this type
//! only tracks which state the modal is in and which link it shows.

use crate::document::ShareLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareState {
    #[default]
    Hidden,
    Visible,
    Copied,
}

#[derive(Debug, Default)]
pub struct ShareFlow {
    state: ShareState,
    link: Option<ShareLink>,
}

impl ShareFlow {
    pub fn state(&self) -> ShareState {
        self.state
    }

    pub fn link(&self) -> Option<&ShareLink> {
        self.link.as_ref()
    }

    /// Show the modal for a freshly created link.
    pub fn open(&mut self, link: ShareLink) {
        self.link = Some(link);
        self.state = ShareState::Visible;
    }

    /// Explicit close. Returns whether the modal was showing.
    pub fn close(&mut self) -> bool {
        let was_open = self.state != ShareState::Hidden;
        self.state = ShareState::Hidden;
        was_open
    }

    /// Copy action. Returns the link to put on the clipboard, or `None`
    /// when the modal is hidden.
    ///
    /// Copying again while already `Copied` stays `Copied`; the caller
    /// restarts the confirmation timer.
    pub fn copy(&mut self) -> Option<&ShareLink> {
        match self.state {
            ShareState::Hidden => None,
            ShareState::Visible | ShareState::Copied => {
                self.state = ShareState::Copied;
                self.link.as_ref()
            }
        }
    }

    /// Confirmation timer elapsed. Returns whether the modal should now hide.
    pub fn confirmation_elapsed(&mut self) -> bool {
        if self.state == ShareState::Copied {
            self.state = ShareState::Hidden;
            true
        } else {
            false
        }
    }
}
