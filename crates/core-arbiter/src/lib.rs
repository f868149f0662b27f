//! Keystroke arbitration between a modal editing engine and its host.
//!
//! Each key-down reaching an editor view is either offered to the modal engine
//! (mode switches, motions, operators) or left to the host's native text path
//! and to competing overlays (completion, signature help, inline rename). The
//! decision is made per event from freshly polled collaborator state; there is
//! no way to take a wrong decision back, so every uncertain branch defers to the
//! host.
//!
//! * [`admission`]: the ordered reject clauses.
//! * [`processor`]: translation, engine dispatch, mode-change tracking and the
//!   status line refresh.
//! * [`collaborators`]: the query contracts the host implements.

pub mod admission;
pub mod collaborators;
pub mod processor;

pub use admission::{Admission, AdmissionPolicy, Rejection};
pub use collaborators::{
    CollaboratorError, Collaborators, CompletionOverlay, ModalEngine, RenameSession,
    SignatureHelpOverlay, StatusLine,
};
pub use core_input::{KeyTranslationService, SpecialKeyTranslator};
pub use processor::{Dispatch, KeyDownOutcome, ViewKeyProcessor};
