//! Per-view key-down processor.
//!
//! One `ViewKeyProcessor` is bound to each editor view. For every key-down the
//! host builds a [`Collaborators`] bundle and calls [`handle_key_down`]; the
//! returned outcome's `handled` flag is what the host writes back onto its
//! event. Keys that map to text input stay with the host's text path.
//!
//! [`handle_key_down`]: ViewKeyProcessor::handle_key_down

use crate::admission::{self, Admission, AdmissionPolicy, Rejection};
use crate::collaborators::Collaborators;
use core_config::Config;
use core_events::{RawKeyEvent, StructuredKey};
use core_input::{KeyTranslationService, SpecialKeyTranslator};
use core_render::StatusProjector;
use core_state::{HandledResult, ViewId};
use tracing::{debug, trace};

/// What happened to an event after the admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Rejected by the admission predicate; the engine was never consulted.
    NotAdmitted(Rejection),
    /// Admitted but not a special key; ordinary text for the host.
    Untranslated,
    /// Engine reported it cannot process the key.
    Refused(StructuredKey),
    Processed {
        key: StructuredKey,
        result: HandledResult,
    },
}

impl Dispatch {
    /// Only a fully handled key sets the host flag. Partial results fall through so
    /// the host text path can still insert the key.
    pub fn is_handled(&self) -> bool {
        match self {
            Dispatch::Processed { result, .. } => result.is_fully_handled(),
            _ => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Dispatch::NotAdmitted(_) => "not_admitted",
            Dispatch::Untranslated => "untranslated",
            Dispatch::Refused(_) => "refused",
            Dispatch::Processed { .. } => "processed",
        }
    }
}

/// Result of one `handle_key_down` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDownOutcome {
    /// Value for the host event's handled flag.
    pub handled: bool,
    pub dispatch: Dispatch,
    /// Mode crossed a boundary during this event.
    pub mode_changed: bool,
    /// False when the status accessor could not answer; the host line keeps the
    /// previous text for this event.
    pub status_refreshed: bool,
}

impl KeyDownOutcome {
    pub fn admission(&self) -> Admission {
        match self.dispatch {
            Dispatch::NotAdmitted(r) => Admission::Rejected(r),
            _ => Admission::Admitted,
        }
    }
}

pub struct ViewKeyProcessor<T = SpecialKeyTranslator> {
    view: ViewId,
    translator: T,
    projector: StatusProjector,
    policy: AdmissionPolicy,
    mode_changed: bool,
}

impl ViewKeyProcessor<SpecialKeyTranslator> {
    /// Processor with the built-in special key table and default behavior.
    pub fn for_view(view: ViewId) -> Self {
        Self::new(view, SpecialKeyTranslator::new())
    }
}

impl<T: KeyTranslationService> ViewKeyProcessor<T> {
    pub fn new(view: ViewId, translator: T) -> Self {
        Self {
            view,
            translator,
            projector: StatusProjector::default(),
            policy: AdmissionPolicy::default(),
            mode_changed: false,
        }
    }

    /// Apply caret marker and tab reservation from `config`.
    pub fn with_config(self, config: &Config) -> Self {
        self.with_projector(StatusProjector::new(config.caret_marker()))
            .with_policy(AdmissionPolicy::from_config(config))
    }

    pub fn with_projector(mut self, projector: StatusProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn with_policy(mut self, policy: AdmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Whether the most recent key-down moved the engine across a mode boundary.
    /// Recomputed on every event; false for events that never reached the engine.
    pub fn mode_changed(&self) -> bool {
        self.mode_changed
    }

    /// Arbitrate one key-down.
    ///
    /// Always refreshes the status line (unless the status accessor fails) before
    /// returning, whatever the admission outcome.
    pub fn handle_key_down(
        &mut self,
        event: &RawKeyEvent,
        collaborators: &mut Collaborators<'_>,
    ) -> KeyDownOutcome {
        trace!(
            target: "input.arbiter",
            view = %self.view,
            key_code = event.key_code,
            chars_len = event.chars_len(),
            modifiers = ?event.modifiers,
            "key_down"
        );
        self.mode_changed = false;

        let dispatch = match admission::evaluate(event, self.view, collaborators, self.policy) {
            Admission::Rejected(reason) => {
                debug!(
                    target: "input.arbiter",
                    view = %self.view,
                    key_code = event.key_code,
                    reason = reason.as_str(),
                    "key_rejected"
                );
                Dispatch::NotAdmitted(reason)
            }
            Admission::Admitted => {
                let before = collaborators.engine.mode();
                let dispatch = self.dispatch(event, collaborators);
                let after = collaborators.engine.mode();
                self.mode_changed = before != after;
                if self.mode_changed {
                    debug!(
                        target: "input.arbiter",
                        view = %self.view,
                        from = %before,
                        to = %after,
                        "mode_changed"
                    );
                }
                dispatch
            }
        };

        let handled = dispatch.is_handled();
        debug!(
            target: "input.arbiter",
            view = %self.view,
            key_code = event.key_code,
            dispatch = dispatch.kind(),
            handled,
            "key_down_resolved"
        );
        let status_refreshed = self.refresh_status(collaborators);
        KeyDownOutcome {
            handled,
            dispatch,
            mode_changed: self.mode_changed,
            status_refreshed,
        }
    }

    fn dispatch(&self, event: &RawKeyEvent, collaborators: &mut Collaborators<'_>) -> Dispatch {
        let Some(key) = self.translator.try_translate(event) else {
            return Dispatch::Untranslated;
        };
        if !collaborators.engine.can_process(&key) {
            trace!(target: "input.arbiter", key = %key, "engine_refused");
            return Dispatch::Refused(key);
        }
        let result = collaborators.engine.process(&key);
        trace!(target: "input.arbiter", key = %key, ?result, "engine_processed");
        Dispatch::Processed { key, result }
    }

    fn refresh_status(&self, collaborators: &mut Collaborators<'_>) -> bool {
        match collaborators.engine.display_status() {
            Ok(status) => {
                let mode = collaborators.engine.mode();
                let text = self.projector.render(&status, mode);
                trace!(
                    target: "render.status",
                    view = %self.view,
                    mode = %mode,
                    caret = status.caret_position,
                    text_len = status.char_len(),
                    "status_shown"
                );
                collaborators.status_line.show_message(&text);
                true
            }
            Err(err) => {
                debug!(
                    target: "input.arbiter",
                    view = %self.view,
                    error = %err,
                    "status_unavailable_keeping_previous"
                );
                false
            }
        }
    }
}
