mod common;

use common::{FakeEngine, Host, VIEW, keys};
use core_arbiter::ViewKeyProcessor;
use core_config::Config;
use core_state::{DisplayStatus, ModeKind};
use pretty_assertions::assert_eq;

#[test]
fn status_refreshed_even_when_rejected() {
    let engine = FakeEngine::new(ModeKind::Normal).with_status(DisplayStatus::at_end("NORMAL"));
    let mut host = Host::new(engine).rename(Some(true));
    let out = host.press(&keys::text("x"));
    assert!(!out.handled);
    assert!(out.status_refreshed);
    assert_eq!(host.last_status(), Some("NORMAL"));
}

#[test]
fn status_refreshed_for_dead_key() {
    let engine = FakeEngine::new(ModeKind::Insert).with_status(DisplayStatus::at_end("-- INSERT --"));
    let mut host = Host::new(engine);
    host.press(&keys::dead());
    assert_eq!(host.status_lines, vec!["-- INSERT --".to_string()]);
}

#[test]
fn command_mode_status_gets_caret_marker() {
    let engine = FakeEngine::new(ModeKind::Command).with_status(DisplayStatus::new(":wq", 1));
    let mut host = Host::new(engine);
    host.press(&keys::text("q"));
    assert_eq!(host.last_status(), Some(":|wq"));
}

#[test]
fn status_reflects_post_dispatch_mode_and_text() {
    let engine = FakeEngine::new(ModeKind::Normal)
        .with_status(DisplayStatus::default())
        .switching_to(ModeKind::Command)
        .with_status_after(DisplayStatus::at_end(":"));
    let mut host = Host::new(engine);
    host.press(&keys::ctrl('o'));
    assert_eq!(host.last_status(), Some(":|"));
}

#[test]
fn status_failure_keeps_previous_line() {
    let engine = FakeEngine::new(ModeKind::Normal).with_status(DisplayStatus::at_end("NORMAL"));
    let mut host = Host::new(engine);
    host.press(&keys::esc());
    host.engine = FakeEngine::new(ModeKind::Normal).with_status_error();
    let out = host.press(&keys::esc());
    assert!(out.handled, "status failure does not change the dispatch result");
    assert!(!out.status_refreshed);
    assert_eq!(host.status_lines, vec!["NORMAL".to_string()]);
}

#[test]
fn configured_marker_used() -> anyhow::Result<()> {
    let cfg = Config::from_toml_str("[status]\ncaret_marker = \"_\"\n")?;
    let processor = ViewKeyProcessor::for_view(VIEW).with_config(&cfg);
    let engine = FakeEngine::new(ModeKind::Command).with_status(DisplayStatus::at_end("/abc"));
    let mut host = Host::with_processor(engine, processor);
    host.press(&keys::esc());
    assert_eq!(host.last_status(), Some("/abc_"));
    Ok(())
}
