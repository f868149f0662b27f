//! Status line projection.
//!
//! The modal engine reports its status as text plus a caret offset. In the
//! line-editing mode (`ModeKind::Command`) the host status line has no caret of
//! its own, so a synthetic marker is spliced into a *copy* of the text at the
//! caret. Every other mode shows the text verbatim and ignores the caret.
//!
//! Two-stage pipeline, same shape as the rest of our chrome rendering:
//! 1. `compose_status` produces ordered `StatusSegment`s.
//! 2. `format_status` renders them into the final string.
//!
//! Caret offsets count chars, so the marker can never land inside a UTF-8
//! sequence. Out-of-range offsets clamp to the end of the text.

use core_state::{DisplayStatus, ModeKind};

/// Default synthetic caret marker.
pub const CARET_MARKER: char = '|';

/// Discrete status line segments (order-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    /// Verbatim slice of the engine status text.
    Text(&'a str),
    /// Visual-only caret; never part of the engine's buffer.
    CaretMarker(char),
}

/// Byte index of char offset `caret` in `text`, clamped to `text.len()`.
fn caret_byte_index(text: &str, caret: usize) -> usize {
    text.char_indices()
        .nth(caret)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Produce ordered segments for `status` in `mode`.
pub fn compose_status<'a>(
    status: &'a DisplayStatus,
    mode: ModeKind,
    marker: char,
) -> Vec<StatusSegment<'a>> {
    let text = status.text.as_str();
    if !mode.is_command_line() {
        return vec![StatusSegment::Text(text)];
    }
    let split = caret_byte_index(text, status.caret_position);
    let (before, after) = text.split_at(split);
    let mut out = Vec::with_capacity(3);
    if !before.is_empty() {
        out.push(StatusSegment::Text(before));
    }
    out.push(StatusSegment::CaretMarker(marker));
    if !after.is_empty() {
        out.push(StatusSegment::Text(after));
    }
    out
}

/// Render ordered segments into the status line string.
pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let cap = segments
        .iter()
        .map(|seg| match seg {
            StatusSegment::Text(t) => t.len(),
            StatusSegment::CaretMarker(m) => m.len_utf8(),
        })
        .sum();
    let mut s = String::with_capacity(cap);
    for seg in segments {
        match seg {
            StatusSegment::Text(t) => s.push_str(t),
            StatusSegment::CaretMarker(m) => s.push(*m),
        }
    }
    s
}

/// Render with the default `|` marker.
pub fn render_status(status: &DisplayStatus, mode: ModeKind) -> String {
    StatusProjector::default().render(status, mode)
}

/// Status projector carrying the configured caret marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProjector {
    marker: char,
}

impl Default for StatusProjector {
    fn default() -> Self {
        Self::new(CARET_MARKER)
    }
}

impl StatusProjector {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Pure: same inputs always yield the same string.
    pub fn render(&self, status: &DisplayStatus, mode: ModeKind) -> String {
        format_status(&compose_status(status, mode, self.marker))
    }
}
