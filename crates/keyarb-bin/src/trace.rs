//! Key-event trace files.
//!
//! A trace is a TOML document describing the starting engine state and a
//! sequence of key-downs, each with the overlay state at that instant and the
//! engine's scripted answer if the key reaches it:
//!
//! ```toml
//! [engine]
//! mode = "insert"
//! status = { text = "-- INSERT --", caret_position = 12 }
//!
//! [[event]]
//! label = "escape closes completion"
//! characters = "\u001b"
//! key_code = 0x35
//! completion = true
//! expect_handled = true
//! engine = { mode = "normal", status = { text = "" } }
//! ```

use anyhow::{Context, Result};
use core_events::{KeyModifiers, RawKeyEvent};
use core_state::{DisplayStatus, HandledResult, ModeKind};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default = "Trace::default_view")]
    pub view: u64,
    #[serde(default)]
    pub engine: InitialEngine,
    #[serde(default, rename = "event")]
    pub events: Vec<TraceEvent>,
}

impl Trace {
    fn default_view() -> u64 {
        1
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parsing key trace")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading trace {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitialEngine {
    #[serde(default = "InitialEngine::default_mode")]
    pub mode: ModeKind,
    #[serde(default)]
    pub status: DisplayStatus,
}

impl Default for InitialEngine {
    fn default() -> Self {
        Self {
            mode: Self::default_mode(),
            status: DisplayStatus::default(),
        }
    }
}

impl InitialEngine {
    fn default_mode() -> ModeKind {
        ModeKind::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Shift,
    Control,
    Option,
    Command,
    CapsLock,
    Function,
    NumericPad,
}

impl Modifier {
    fn flag(self) -> KeyModifiers {
        match self {
            Modifier::Shift => KeyModifiers::SHIFT,
            Modifier::Control => KeyModifiers::CONTROL,
            Modifier::Option => KeyModifiers::OPTION,
            Modifier::Command => KeyModifiers::COMMAND,
            Modifier::CapsLock => KeyModifiers::CAPS_LOCK,
            Modifier::Function => KeyModifiers::FUNCTION,
            Modifier::NumericPad => KeyModifiers::NUMERIC_PAD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Completion,
    SignatureHelp,
    Rename,
}

/// Engine answer for one event, applied only when the key reaches `process`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineScript {
    #[serde(default = "EngineScript::default_can_process")]
    pub can_process: bool,
    #[serde(default = "EngineScript::default_result")]
    pub result: HandledResult,
    /// Mode after processing (unchanged when absent).
    pub mode: Option<ModeKind>,
    /// Status after processing (unchanged when absent).
    pub status: Option<DisplayStatus>,
}

impl Default for EngineScript {
    fn default() -> Self {
        Self {
            can_process: Self::default_can_process(),
            result: Self::default_result(),
            mode: None,
            status: None,
        }
    }
}

impl EngineScript {
    fn default_can_process() -> bool {
        true
    }
    fn default_result() -> HandledResult {
        HandledResult::Handled
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceEvent {
    pub label: Option<String>,
    #[serde(default)]
    pub characters: String,
    /// Defaults to `characters`.
    pub ignoring: Option<String>,
    pub key_code: u16,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub completion: bool,
    #[serde(default)]
    pub signature_help: bool,
    #[serde(default)]
    pub rename: bool,
    /// Subsystems that fail to answer for this event.
    #[serde(default)]
    pub unavailable: Vec<Subsystem>,
    #[serde(default)]
    pub engine: EngineScript,
    pub expect_handled: Option<bool>,
}

impl TraceEvent {
    pub fn raw_event(&self) -> RawKeyEvent {
        let modifiers = self
            .modifiers
            .iter()
            .fold(KeyModifiers::empty(), |acc, m| acc | m.flag());
        let ignoring = self
            .ignoring
            .clone()
            .unwrap_or_else(|| self.characters.clone());
        RawKeyEvent::new(self.characters.clone(), ignoring, self.key_code, modifiers)
    }

    /// Overlay answer as seen by the arbiter: `None` when the subsystem is unavailable.
    pub fn answer(&self, subsystem: Subsystem) -> Option<bool> {
        if self.unavailable.contains(&subsystem) {
            return None;
        }
        Some(match subsystem {
            Subsystem::Completion => self.completion,
            Subsystem::SignatureHelp => self.signature_help,
            Subsystem::Rename => self.rename,
        })
    }
}
