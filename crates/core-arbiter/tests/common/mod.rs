#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_arbiter::{
    CollaboratorError, Collaborators, CompletionOverlay, KeyDownOutcome, KeyTranslationService,
    ModalEngine, RenameSession, SignatureHelpOverlay, SpecialKeyTranslator, ViewKeyProcessor,
};
use core_events::{KeyModifiers, RawKeyEvent, StructuredKey, key_codes};
use core_state::{DisplayStatus, HandledResult, ModeKind, ViewId};
use std::cell::Cell;

pub const VIEW: ViewId = ViewId(1);

/// Scripted modal engine recording every call made by the arbiter.
pub struct FakeEngine {
    pub mode: ModeKind,
    pub accepts: bool,
    pub result: HandledResult,
    /// Mode to switch to when `process` runs.
    pub mode_after: Option<ModeKind>,
    /// Status to report once `process` runs.
    pub status_after: Option<DisplayStatus>,
    pub status: Result<DisplayStatus, CollaboratorError>,
    pub can_process_calls: Cell<usize>,
    pub processed: Vec<StructuredKey>,
}

impl FakeEngine {
    pub fn new(mode: ModeKind) -> Self {
        Self {
            mode,
            accepts: true,
            result: HandledResult::Handled,
            mode_after: None,
            status_after: None,
            status: Ok(DisplayStatus::default()),
            can_process_calls: Cell::new(0),
            processed: Vec::new(),
        }
    }

    pub fn refusing(mut self) -> Self {
        self.accepts = false;
        self
    }

    pub fn returning(mut self, result: HandledResult) -> Self {
        self.result = result;
        self
    }

    pub fn switching_to(mut self, mode: ModeKind) -> Self {
        self.mode_after = Some(mode);
        self
    }

    pub fn with_status(mut self, status: DisplayStatus) -> Self {
        self.status = Ok(status);
        self
    }

    pub fn with_status_after(mut self, status: DisplayStatus) -> Self {
        self.status_after = Some(status);
        self
    }

    pub fn with_status_error(mut self) -> Self {
        self.status = Err(CollaboratorError::not_ready("status"));
        self
    }

    /// True when neither `can_process` nor `process` was ever called.
    pub fn untouched(&self) -> bool {
        self.can_process_calls.get() == 0 && self.processed.is_empty()
    }
}

impl ModalEngine for FakeEngine {
    fn mode(&self) -> ModeKind {
        self.mode
    }

    fn can_process(&self, _key: &StructuredKey) -> bool {
        self.can_process_calls.set(self.can_process_calls.get() + 1);
        self.accepts
    }

    fn process(&mut self, key: &StructuredKey) -> HandledResult {
        self.processed.push(*key);
        if let Some(mode) = self.mode_after {
            self.mode = mode;
        }
        if let Some(status) = self.status_after.take() {
            self.status = Ok(status);
        }
        self.result
    }

    fn display_status(&self) -> Result<DisplayStatus, CollaboratorError> {
        self.status.clone()
    }
}

/// Overlay / rename stand-in counting how often it was polled.
pub struct ScriptedQuery {
    pub answer: Option<bool>,
    pub calls: Cell<usize>,
}

impl ScriptedQuery {
    pub fn new(answer: Option<bool>) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }

    fn poll(&self, subsystem: &'static str) -> Result<bool, CollaboratorError> {
        self.calls.set(self.calls.get() + 1);
        self.answer.ok_or(CollaboratorError::not_ready(subsystem))
    }
}

impl CompletionOverlay for ScriptedQuery {
    fn is_completion_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        self.poll("completion")
    }
}

impl SignatureHelpOverlay for ScriptedQuery {
    fn is_signature_help_active(&self, _view: ViewId) -> Result<bool, CollaboratorError> {
        self.poll("signature_help")
    }
}

impl RenameSession for ScriptedQuery {
    fn in_rename(&self) -> Result<bool, CollaboratorError> {
        self.poll("rename")
    }
}

/// Minimal host: one view, its collaborators and the status line history.
pub struct Host<T: KeyTranslationService = SpecialKeyTranslator> {
    pub engine: FakeEngine,
    pub completion: ScriptedQuery,
    pub signature_help: ScriptedQuery,
    pub rename: ScriptedQuery,
    pub status_lines: Vec<String>,
    pub processor: ViewKeyProcessor<T>,
}

impl Host<SpecialKeyTranslator> {
    pub fn new(engine: FakeEngine) -> Self {
        Self::with_processor(engine, ViewKeyProcessor::for_view(VIEW))
    }
}

impl<T: KeyTranslationService> Host<T> {
    pub fn with_processor(engine: FakeEngine, processor: ViewKeyProcessor<T>) -> Self {
        Self {
            engine,
            completion: ScriptedQuery::new(Some(false)),
            signature_help: ScriptedQuery::new(Some(false)),
            rename: ScriptedQuery::new(Some(false)),
            status_lines: Vec::new(),
            processor,
        }
    }

    pub fn completion(mut self, answer: Option<bool>) -> Self {
        self.completion = ScriptedQuery::new(answer);
        self
    }

    pub fn signature_help(mut self, answer: Option<bool>) -> Self {
        self.signature_help = ScriptedQuery::new(answer);
        self
    }

    pub fn rename(mut self, answer: Option<bool>) -> Self {
        self.rename = ScriptedQuery::new(answer);
        self
    }

    pub fn press(&mut self, event: &RawKeyEvent) -> KeyDownOutcome {
        let lines = &mut self.status_lines;
        let mut sink = |text: &str| lines.push(text.to_string());
        let mut collaborators = Collaborators {
            engine: &mut self.engine,
            completion: &self.completion,
            signature_help: &self.signature_help,
            rename: &self.rename,
            status_line: &mut sink,
        };
        self.processor.handle_key_down(event, &mut collaborators)
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_lines.last().map(String::as_str)
    }
}

/// Translator treating every produced char as a structured key (engine grammar
/// that claims all printable keys).
pub fn translate_all(event: &RawKeyEvent) -> Option<StructuredKey> {
    event.characters.chars().next().map(StructuredKey::char)
}

pub mod keys {
    use super::*;

    pub fn text(s: &str) -> RawKeyEvent {
        RawKeyEvent::plain(s, key_codes::ANSI_X)
    }

    pub fn esc() -> RawKeyEvent {
        RawKeyEvent::plain("\u{1b}", key_codes::ESCAPE)
    }

    pub fn tab() -> RawKeyEvent {
        RawKeyEvent::plain("\t", key_codes::TAB)
    }

    pub fn enter() -> RawKeyEvent {
        RawKeyEvent::plain("\r", key_codes::RETURN)
    }

    /// Option-e on a US layout: first half of the `é` dead-key sequence.
    pub fn dead() -> RawKeyEvent {
        RawKeyEvent::new("", "e", key_codes::ANSI_E, KeyModifiers::OPTION)
    }

    pub fn ctrl(c: char) -> RawKeyEvent {
        let control = char::from_u32((c as u32) & 0x1f).unwrap_or('\0');
        RawKeyEvent::new(
            control.to_string(),
            c.to_string(),
            key_codes::ANSI_D,
            KeyModifiers::CONTROL,
        )
    }
}
