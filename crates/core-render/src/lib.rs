//! Rendering of engine-reported state for host chrome.
//!
//! The host owns the actual widgets; this crate only derives the text they
//! display. Currently a single consumer: the status line (`status`).

pub mod status;

pub use status::{CARET_MARKER, StatusProjector, render_status};
