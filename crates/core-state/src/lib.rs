//! Engine-facing state shared across the arbiter and status projector.
//!
//! Everything here is a plain value: the modal engine owns the real state and
//! reports it through these types once per key event.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Current mode of the modal engine.
///
/// The exact set is owned by the engine; the arbiter only distinguishes
/// `Insert` (tab reservation) and the projector only distinguishes `Command`
/// (caret marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Normal,
    Insert,
    Replace,
    VisualCharacter,
    VisualLine,
    VisualBlock,
    /// Line-editing mode (`:` command line, search prompt).
    Command,
    SelectCharacter,
    /// Engine attached but switched off; it will refuse everything.
    Disabled,
    ExternalEdit,
    Uninitialized,
}

impl ModeKind {
    pub fn is_command_line(self) -> bool {
        matches!(self, ModeKind::Command)
    }

    pub fn label(self) -> &'static str {
        match self {
            ModeKind::Normal => "NORMAL",
            ModeKind::Insert => "INSERT",
            ModeKind::Replace => "REPLACE",
            ModeKind::VisualCharacter => "VISUAL",
            ModeKind::VisualLine => "VISUAL LINE",
            ModeKind::VisualBlock => "VISUAL BLOCK",
            ModeKind::Command => "COMMAND",
            ModeKind::SelectCharacter => "SELECT",
            ModeKind::Disabled => "DISABLED",
            ModeKind::ExternalEdit => "EXTERNAL",
            ModeKind::Uninitialized => "UNINITIALIZED",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mode `{0}`")]
pub struct UnknownMode(pub String);

/// Accepts the snake_case names used in trace files plus the short Vim forms
/// (`n`, `i`, `v`, `c`, ...).
impl FromStr for ModeKind {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "n" => ModeKind::Normal,
            "insert" | "i" => ModeKind::Insert,
            "replace" | "r" => ModeKind::Replace,
            "visual_character" | "visual" | "v" => ModeKind::VisualCharacter,
            "visual_line" | "vl" => ModeKind::VisualLine,
            "visual_block" | "vb" => ModeKind::VisualBlock,
            "command" | "c" => ModeKind::Command,
            "select_character" | "select" | "s" => ModeKind::SelectCharacter,
            "disabled" => ModeKind::Disabled,
            "external_edit" => ModeKind::ExternalEdit,
            "uninitialized" => ModeKind::Uninitialized,
            _ => return Err(UnknownMode(s.to_string())),
        };
        Ok(mode)
    }
}

/// Outcome of `ModalEngine::process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandledResult {
    /// Key fully consumed as a command or engine-side insertion.
    Handled,
    /// Engine consumed part of the key (e.g. buffered a mapping prefix) but the host may
    /// still want to insert it.
    PartiallyHandled,
    Unhandled,
}

impl HandledResult {
    /// Only `Handled` counts; a partial result still belongs to the host.
    pub fn is_fully_handled(self) -> bool {
        matches!(self, HandledResult::Handled)
    }
}

/// Status-line content reported by the engine for the current instant.
///
/// `caret_position` counts chars (Unicode scalar values) into `text`. The
/// constructor clamps it to `0..=char_len(text)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DisplayStatus {
    pub text: String,
    #[serde(default)]
    pub caret_position: usize,
}

impl DisplayStatus {
    pub fn new(text: impl Into<String>, caret_position: usize) -> Self {
        let mut status = Self {
            text: text.into(),
            caret_position,
        };
        status.caret_position = status.caret_position.min(status.char_len());
        status
    }

    /// Status text with the caret parked at the end.
    pub fn at_end(text: impl Into<String>) -> Self {
        Self::new(text, usize::MAX)
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Opaque identity of one editor view (one per open document surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}
