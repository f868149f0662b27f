//! Collaborator contracts consumed by the arbiter.
//!
//! Every competing subsystem is modeled as a read-only query capability that
//! is polled fresh on each key event. Nothing here is cached: a completion list
//! can open or close between two keystrokes.

use core_events::StructuredKey;
use core_state::{DisplayStatus, HandledResult, ModeKind, ViewId};
use thiserror::Error;

/// A collaborator could not answer a query for this event.
///
/// Overlay and rename queries that fail are treated as "inactive" by the
/// arbiter; a failed status accessor skips the status refresh for one event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{subsystem} is not ready")]
    NotReady { subsystem: &'static str },
    #[error("{subsystem} unavailable: {reason}")]
    Unavailable {
        subsystem: &'static str,
        reason: String,
    },
}

impl CollaboratorError {
    pub fn not_ready(subsystem: &'static str) -> Self {
        Self::NotReady { subsystem }
    }

    pub fn subsystem(&self) -> &'static str {
        match self {
            Self::NotReady { subsystem } | Self::Unavailable { subsystem, .. } => subsystem,
        }
    }
}

/// The modal engine bound to one editor view.
pub trait ModalEngine {
    fn mode(&self) -> ModeKind;
    fn can_process(&self, key: &StructuredKey) -> bool;
    fn process(&mut self, key: &StructuredKey) -> HandledResult;
    /// Status text + caret offset for the current instant.
    fn display_status(&self) -> Result<DisplayStatus, CollaboratorError>;
}

pub trait CompletionOverlay {
    fn is_completion_active(&self, view: ViewId) -> Result<bool, CollaboratorError>;
}

pub trait SignatureHelpOverlay {
    fn is_signature_help_active(&self, view: ViewId) -> Result<bool, CollaboratorError>;
}

/// Inline rename session. Owns every keystroke while in progress.
pub trait RenameSession {
    fn in_rename(&self) -> Result<bool, CollaboratorError>;
}

/// Host status line. Fire-and-forget.
pub trait StatusLine {
    fn show_message(&mut self, text: &str);
}

// Fixed answers: `bool` always answers, `Option<bool>` answers `NotReady` for `None`.

impl CompletionOverlay for bool {
    fn is_completion_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        Ok(*self)
    }
}

impl CompletionOverlay for Option<bool> {
    fn is_completion_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        self.ok_or(CollaboratorError::not_ready("completion"))
    }
}

impl SignatureHelpOverlay for bool {
    fn is_signature_help_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        Ok(*self)
    }
}

impl SignatureHelpOverlay for Option<bool> {
    fn is_signature_help_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        self.ok_or(CollaboratorError::not_ready("signature_help"))
    }
}

impl RenameSession for bool {
    fn in_rename(&self) -> Result<bool, CollaboratorError> {
        Ok(*self)
    }
}

impl RenameSession for Option<bool> {
    fn in_rename(&self) -> Result<bool, CollaboratorError> {
        self.ok_or(CollaboratorError::not_ready("rename"))
    }
}

impl<F> StatusLine for F
where
    F: FnMut(&str),
{
    fn show_message(&mut self, text: &str) {
        self(text)
    }
}

/// Non-owning view of every collaborator for one key event.
///
/// Built by the host per callback from its per-view object graph; the arbiter
/// never keeps it past `handle_key_down`.
pub struct Collaborators<'a> {
    pub engine: &'a mut dyn ModalEngine,
    pub completion: &'a dyn CompletionOverlay,
    pub signature_help: &'a dyn SignatureHelpOverlay,
    pub rename: &'a dyn RenameSession,
    pub status_line: &'a mut dyn StatusLine,
}
