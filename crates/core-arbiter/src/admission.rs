//! Admission predicate: is this key event even offered to the modal engine?
//!
//! Clauses are evaluated in a fixed order and short-circuit on the first
//! rejection. Order is observable: collaborators after the rejecting clause
//! are never queried, and e.g. a rename session in Insert mode must reject as
//! `RenameInProgress` before the tab reservation is considered.
//!
//! 1. `DeadKey`: no produced characters (intermediate dead-key step).
//! 2. `CompletionActive`: completion list open, key is not Escape.
//! 3. `SignatureHelpActive`: signature help open, key is not Escape.
//! 4. `RenameInProgress`: inline rename active, any key (Escape included).
//! 5. `InsertTab`: Insert mode and the key produced exactly `"\t"`.

use crate::collaborators::{CollaboratorError, Collaborators};
use core_events::RawKeyEvent;
use core_state::{ModeKind, ViewId};
use std::fmt;
use tracing::debug;

/// Why an event was left to the host's text path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    DeadKey,
    CompletionActive,
    SignatureHelpActive,
    RenameInProgress,
    InsertTab,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::DeadKey => "dead_key",
            Rejection::CompletionActive => "completion_active",
            Rejection::SignatureHelpActive => "signature_help_active",
            Rejection::RenameInProgress => "rename_in_progress",
            Rejection::InsertTab => "insert_tab",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Admission {
    Admitted,
    Rejected(Rejection),
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        matches!(self, Admission::Admitted)
    }

    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Admission::Admitted => None,
            Admission::Rejected(r) => Some(r),
        }
    }
}

/// Tunables for the predicate. Defaults reproduce the canonical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    /// Leave `\t` in Insert mode to the host's snippet expansion.
    pub reserve_insert_tab: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            reserve_insert_tab: true,
        }
    }
}

impl AdmissionPolicy {
    pub fn from_config(config: &core_config::Config) -> Self {
        Self {
            reserve_insert_tab: config.reserve_insert_tab(),
        }
    }
}

/// A query that cannot answer counts as inactive: the bias is always toward
/// letting the host handle the key, never toward running a command.
fn active_or_inactive(answer: Result<bool, CollaboratorError>) -> bool {
    answer.unwrap_or_else(|err| {
        debug!(
            target: "input.arbiter",
            subsystem = err.subsystem(),
            error = %err,
            "collaborator_unavailable_treated_inactive"
        );
        false
    })
}

/// Run the ordered predicate for `event` on `view`.
pub fn evaluate(
    event: &RawKeyEvent,
    view: ViewId,
    collaborators: &Collaborators<'_>,
    policy: AdmissionPolicy,
) -> Admission {
    if event.is_dead_key() {
        return Admission::Rejected(Rejection::DeadKey);
    }
    let escape = event.is_escape();
    if !escape && active_or_inactive(collaborators.completion.is_completion_active(view)) {
        return Admission::Rejected(Rejection::CompletionActive);
    }
    if !escape
        && active_or_inactive(collaborators.signature_help.is_signature_help_active(view))
    {
        return Admission::Rejected(Rejection::SignatureHelpActive);
    }
    if active_or_inactive(collaborators.rename.in_rename()) {
        return Admission::Rejected(Rejection::RenameInProgress);
    }
    if policy.reserve_insert_tab
        && event.characters == "\t"
        && collaborators.engine.mode() == ModeKind::Insert
    {
        return Admission::Rejected(Rejection::InsertTab);
    }
    Admission::Admitted
}
