mod common;

use common::{FakeEngine, Host, keys};
use core_arbiter::{Dispatch, Rejection};
use core_state::ModeKind;

#[test]
fn dead_key_rejected_before_any_query() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal)).completion(Some(true));
    let out = host.press(&keys::dead());
    assert!(!out.handled);
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::DeadKey));
    assert_eq!(host.completion.calls.get(), 0);
    assert_eq!(host.rename.calls.get(), 0);
    assert!(host.engine.untouched());
}

#[test]
fn dead_key_never_processed_in_any_mode() {
    for mode in [ModeKind::Normal, ModeKind::Insert, ModeKind::Command, ModeKind::VisualLine] {
        let mut host = Host::new(FakeEngine::new(mode));
        let out = host.press(&keys::dead());
        assert!(!out.handled, "{mode:?}");
        assert!(host.engine.processed.is_empty(), "{mode:?}");
    }
}

#[test]
fn completion_blocks_everything_but_escape() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal)).completion(Some(true));
    for ev in [keys::text("j"), keys::enter(), keys::ctrl('n'), keys::tab()] {
        let out = host.press(&ev);
        assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::CompletionActive));
    }
    assert!(host.engine.untouched());
    // Signature help and rename are not consulted once completion rejected.
    assert_eq!(host.signature_help.calls.get(), 0);
    assert_eq!(host.rename.calls.get(), 0);

    let out = host.press(&keys::esc());
    assert!(out.handled, "escape must reach the engine to close the popup");
    assert_eq!(host.engine.processed.len(), 1);
}

#[test]
fn signature_help_blocks_everything_but_escape() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Insert)).signature_help(Some(true));
    let out = host.press(&keys::enter());
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::SignatureHelpActive));
    assert!(host.engine.untouched());

    let out = host.press(&keys::esc());
    assert!(out.handled);
}

#[test]
fn rename_rejects_escape_too() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal)).rename(Some(true));
    for ev in [keys::esc(), keys::enter(), keys::ctrl('d'), keys::text("x")] {
        let out = host.press(&ev);
        assert!(!out.handled);
        assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::RenameInProgress));
    }
    assert!(host.engine.processed.is_empty());
}

#[test]
fn rename_rejects_every_key_whatever_the_mode_or_overlays() {
    let modes = [
        ModeKind::Normal,
        ModeKind::Insert,
        ModeKind::Command,
        ModeKind::VisualBlock,
        ModeKind::Replace,
    ];
    let answers = [Some(false), Some(true), None];
    for mode in modes {
        for completion in answers {
            for signature_help in answers {
                let mut host = Host::new(FakeEngine::new(mode))
                    .completion(completion)
                    .signature_help(signature_help)
                    .rename(Some(true));
                for ev in [keys::esc(), keys::tab(), keys::ctrl('d'), keys::text("x")] {
                    let out = host.press(&ev);
                    let ctx = format!("{mode:?} completion={completion:?} sig={signature_help:?}");
                    assert!(!out.handled, "{ctx}");
                    // An active overlay may reject a non-Escape key first; Escape
                    // always falls through to the rename clause.
                    if ev.is_escape() || (completion != Some(true) && signature_help != Some(true)) {
                        assert_eq!(
                            out.dispatch,
                            Dispatch::NotAdmitted(Rejection::RenameInProgress),
                            "{ctx}"
                        );
                    }
                }
                assert!(host.engine.untouched(), "{mode:?}");
            }
        }
    }
}

#[test]
fn escape_with_completion_still_blocked_by_rename() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal))
        .completion(Some(true))
        .rename(Some(true));
    let out = host.press(&keys::esc());
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::RenameInProgress));
}

#[test]
fn insert_mode_tab_left_to_host() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Insert));
    let out = host.press(&keys::tab());
    assert!(!out.handled);
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::InsertTab));
    assert!(host.engine.untouched());
}

#[test]
fn tab_outside_insert_mode_is_admitted() {
    for mode in [ModeKind::Normal, ModeKind::Replace, ModeKind::VisualCharacter] {
        let mut host = Host::new(FakeEngine::new(mode));
        let out = host.press(&keys::tab());
        assert!(out.handled, "{mode:?}");
    }
}

#[test]
fn rename_outranks_insert_tab() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Insert)).rename(Some(true));
    let out = host.press(&keys::tab());
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::RenameInProgress));
}

#[test]
fn completion_outranks_signature_help() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Insert))
        .completion(Some(true))
        .signature_help(Some(true));
    let out = host.press(&keys::text("a"));
    assert_eq!(out.dispatch, Dispatch::NotAdmitted(Rejection::CompletionActive));
}

#[test]
fn unavailable_overlays_count_as_inactive() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal))
        .completion(None)
        .signature_help(None)
        .rename(None);
    let out = host.press(&keys::esc());
    assert!(out.handled);
    assert_eq!(host.completion.calls.get(), 0, "escape skips the completion query");
    assert_eq!(host.rename.calls.get(), 1);

    let out = host.press(&keys::ctrl('d'));
    assert!(out.admission().is_admitted());
    assert_eq!(host.completion.calls.get(), 1);
    assert_eq!(host.signature_help.calls.get(), 1);
}

#[test]
fn overlays_polled_fresh_each_event() {
    let mut host = Host::new(FakeEngine::new(ModeKind::Normal)).completion(Some(true));
    assert!(!host.press(&keys::ctrl('d')).handled);
    host.completion.answer = Some(false);
    assert!(host.press(&keys::ctrl('d')).handled);
    assert_eq!(host.completion.calls.get(), 2);
}
