//! Replays a [`Trace`] through a real `ViewKeyProcessor`.

use crate::trace::{EngineScript, Subsystem, Trace, TraceEvent};
use core_arbiter::{
    CollaboratorError, Collaborators, Dispatch, KeyDownOutcome, ModalEngine, ViewKeyProcessor,
};
use core_config::Config;
use core_events::StructuredKey;
use core_state::{DisplayStatus, HandledResult, ModeKind, ViewId};
use std::fmt;
use tracing::info;

/// Engine stand-in answering from the trace script of the current event.
struct ScriptedEngine {
    mode: ModeKind,
    status: DisplayStatus,
    script: EngineScript,
}

impl ModalEngine for ScriptedEngine {
    fn mode(&self) -> ModeKind {
        self.mode
    }

    fn can_process(&self, _key: &StructuredKey) -> bool {
        self.script.can_process
    }

    fn process(&mut self, _key: &StructuredKey) -> HandledResult {
        if let Some(mode) = self.script.mode {
            self.mode = mode;
        }
        if let Some(status) = self.script.status.take() {
            self.status = status;
        }
        self.script.result
    }

    fn display_status(&self) -> Result<DisplayStatus, CollaboratorError> {
        Ok(self.status.clone())
    }
}

/// One replayed event.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub index: usize,
    pub label: Option<String>,
    pub characters: String,
    pub key_code: u16,
    pub outcome: KeyDownOutcome,
    pub mode_before: ModeKind,
    pub mode_after: ModeKind,
    /// Status line after the event (previous text when not refreshed).
    pub status_line: String,
    pub expect_handled: Option<bool>,
}

impl StepReport {
    pub fn matches_expectation(&self) -> bool {
        self.expect_handled
            .is_none_or(|expected| expected == self.outcome.handled)
    }
}

fn describe_dispatch(dispatch: &Dispatch) -> String {
    match dispatch {
        Dispatch::NotAdmitted(reason) => format!("rejected({reason})"),
        Dispatch::Untranslated => "untranslated".to_string(),
        Dispatch::Refused(key) => format!("refused({key})"),
        Dispatch::Processed { key, result } => format!("processed({key}, {result:?})"),
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<3} {:<8} key=0x{:02x} handled={:<5} {}",
            self.index,
            format!("{:?}", self.characters),
            self.key_code,
            self.outcome.handled,
            describe_dispatch(&self.outcome.dispatch),
        )?;
        if self.outcome.mode_changed {
            write!(f, " mode={}->{}", self.mode_before, self.mode_after)?;
        }
        write!(f, " status={:?}", self.status_line)?;
        if let Some(label) = &self.label {
            write!(f, "  # {label}")?;
        }
        if !self.matches_expectation() {
            f.write_str("  MISMATCH")?;
        }
        Ok(())
    }
}

fn replay_event(
    processor: &mut ViewKeyProcessor,
    engine: &mut ScriptedEngine,
    status_line: &mut String,
    event: &TraceEvent,
) -> KeyDownOutcome {
    engine.script = event.engine.clone();
    let completion = event.answer(Subsystem::Completion);
    let signature_help = event.answer(Subsystem::SignatureHelp);
    let rename = event.answer(Subsystem::Rename);
    let mut sink = |text: &str| {
        status_line.clear();
        status_line.push_str(text);
    };
    let mut collaborators = Collaborators {
        engine,
        completion: &completion,
        signature_help: &signature_help,
        rename: &rename,
        status_line: &mut sink,
    };
    processor.handle_key_down(&event.raw_event(), &mut collaborators)
}

/// Run every event of `trace` in order against a fresh processor.
pub fn replay(trace: &Trace, config: &Config) -> Vec<StepReport> {
    let mut processor = ViewKeyProcessor::for_view(ViewId(trace.view)).with_config(config);
    let mut engine = ScriptedEngine {
        mode: trace.engine.mode,
        status: trace.engine.status.clone(),
        script: EngineScript::default(),
    };
    let mut status_line = String::new();
    info!(
        target: "runtime.replay",
        events = trace.events.len(),
        mode = %trace.engine.mode,
        "replay_start"
    );

    let mut reports = Vec::with_capacity(trace.events.len());
    for (index, event) in trace.events.iter().enumerate() {
        let mode_before = engine.mode;
        let outcome = replay_event(&mut processor, &mut engine, &mut status_line, event);
        reports.push(StepReport {
            index: index + 1,
            label: event.label.clone(),
            characters: event.characters.clone(),
            key_code: event.key_code,
            outcome,
            mode_before,
            mode_after: engine.mode,
            status_line: status_line.clone(),
            expect_handled: event.expect_handled,
        });
    }
    reports
}
