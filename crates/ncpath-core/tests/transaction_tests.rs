//! Transaction Coordinator Tests
//!
//! ## Scenarios Covered
//!
//! 1. A real change commits; dry-run and no-change discard
//! 2. `changed` always agrees with the diff text
//! 3. Illegal transitions are rejected
//! 4. Transport failures surface unchanged and leave the state in place
//! 5. Edits target the candidate datastore with the configured operation

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{Call, MockSession, THREE_INTERFACES};
use ncpath_core::{
    Datastore, DefaultOperation, NcError, NcErrorKind, Node, Path, Settings,
    TransactionCoordinator, TxState,
};

const RUNNING: &str = "<router><interface><interface-name>to_sr2</interface-name>\
    <description>old</description></interface></router>";
const CANDIDATE: &str = "<router><interface><interface-name>to_sr2</interface-name>\
    <description>new</description></interface></router>";

fn description(text: &str) -> Node {
    Node::Mapping(ncpath_core::Mapping::single("description", Node::scalar(text)))
}

fn to_sr2() -> Path {
    Path::parse("router/interface/interface-name=to_sr2").unwrap()
}

#[test]
fn test_change_is_committed() {
    let mut session = MockSession::new(RUNNING).with_candidate(CANDIDATE);
    let settings = Settings::default();

    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    let result = tx.apply(&to_sr2(), &description("new"), false).unwrap();

    assert!(result.changed());
    assert!(result.diff_text().starts_with("--- running\n+++ candidate\n"));
    assert!(result.diff_text().contains("-    \"description\": \"old\""));
    assert!(result.diff_text().contains("+    \"description\": \"new\""));
    assert_eq!(tx.state(), TxState::Committed);
    assert!(session.committed());
    assert!(!session.discarded());
}

#[test]
fn test_dry_run_discards_even_when_changed() {
    let mut session = MockSession::new(RUNNING).with_candidate(CANDIDATE);
    let settings = Settings::default();

    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    let result = tx.apply(&to_sr2(), &description("new"), true).unwrap();

    assert!(result.changed());
    assert_eq!(tx.state(), TxState::Discarded);
    assert!(!session.committed());
    assert!(session.discarded());
}

#[test]
fn test_unchanged_running_config_is_discarded() {
    // GIVEN a candidate identical to running
    let mut session = MockSession::new(THREE_INTERFACES);
    let settings = Settings::default();

    // WHEN applying an edit that changes nothing
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    let path = Path::parse("router/interface/interface-name=to_sr2/description").unwrap();
    let result = tx.apply(&path, &Node::scalar("uplink"), false).unwrap();

    // THEN nothing changed and the candidate is discarded, not committed
    assert!(!result.changed());
    assert_eq!(result.diff_text(), "");
    assert_eq!(tx.state(), TxState::Discarded);
    assert!(!session.committed());
    assert!(session.discarded());
}

#[test]
fn test_dry_run_never_commits() {
    for (candidate, _) in [(RUNNING, false), (CANDIDATE, true)] {
        let mut session = MockSession::new(RUNNING).with_candidate(candidate);
        let settings = Settings::default();
        let mut tx = TransactionCoordinator::new(&mut session, &settings);
        tx.apply(&to_sr2(), &description("new"), true).unwrap();
        assert_ne!(tx.state(), TxState::Committed);
        assert!(!session.committed());
    }
}

#[test]
fn test_changed_matches_diff_text() {
    for candidate in [RUNNING, CANDIDATE, ""] {
        let mut session = MockSession::new(RUNNING).with_candidate(candidate);
        let settings = Settings::default();
        let mut tx = TransactionCoordinator::new(&mut session, &settings);
        let result = tx.apply(&to_sr2(), &description("new"), true).unwrap();
        assert_eq!(result.changed(), !result.diff_text().is_empty());
    }
}

#[test]
fn test_subtree_missing_from_running_compares_as_empty() {
    let mut session = MockSession::new("").with_candidate(CANDIDATE);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);

    tx.edit(&to_sr2(), &description("new")).unwrap();
    let result = tx.verify().unwrap().clone();

    assert!(result.changed());
    assert!(result.diff_text().contains("-{}"));
}

#[test]
fn test_edit_targets_candidate_with_default_operation() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::from_toml_str("default_operation = \"replace\"").unwrap();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    tx.edit(&to_sr2(), &description("new")).unwrap();
    assert_eq!(tx.state(), TxState::Edited);

    match &session.calls[0] {
        Call::EditConfig(target, xml, op) => {
            assert_eq!(*target, Datastore::Candidate);
            assert_eq!(*op, DefaultOperation::Replace);
            assert!(xml.starts_with("<config><configure"));
            assert!(xml.contains("<interface-name>to_sr2</interface-name><description>new</description>"));
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[test]
fn test_verify_reads_running_then_candidate() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    tx.edit(&to_sr2(), &description("new")).unwrap();
    tx.verify().unwrap();

    let reads: Vec<Datastore> = session
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::GetConfig(ds, _) => Some(*ds),
            _ => None,
        })
        .collect();
    assert_eq!(reads, vec![Datastore::Running, Datastore::Candidate]);
}

#[test]
fn test_verify_before_edit_is_invalid() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);

    let err = tx.verify().unwrap_err();
    assert_eq!(
        err,
        NcError::InvalidTransition {
            from: "idle".to_string(),
            to: "verified".to_string(),
        }
    );
    assert_eq!(tx.state(), TxState::Idle);
}

#[test]
fn test_finish_before_verify_is_invalid() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    tx.edit(&to_sr2(), &description("new")).unwrap();

    let err = tx.finish(false).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::InvalidTransition);
    assert_eq!(tx.state(), TxState::Edited);
}

#[test]
fn test_terminal_state_cannot_be_re_edited() {
    let mut session = MockSession::new(RUNNING).with_candidate(CANDIDATE);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    tx.apply(&to_sr2(), &description("new"), false).unwrap();

    let err = tx.edit(&to_sr2(), &description("again")).unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_TRANSITION");
    assert_eq!(tx.state(), TxState::Committed);
}

#[test]
fn test_commit_failure_surfaces_and_allows_discard() {
    // GIVEN a session whose commit fails
    let mut session = MockSession::new(RUNNING)
        .with_candidate(CANDIDATE)
        .failing_on("commit");
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);

    // WHEN applying a real change
    let err = tx.apply(&to_sr2(), &description("new"), false).unwrap_err();

    // THEN the transport error is returned unchanged and no discard happened
    assert_eq!(
        err,
        NcError::Transport {
            op: "commit".to_string(),
            message: "connection reset by peer".to_string(),
        }
    );
    assert_eq!(tx.state(), TxState::Verified);

    // AND the caller can clean up explicitly
    tx.discard().unwrap();
    assert_eq!(tx.state(), TxState::Discarded);
    assert!(session.discarded());
}

#[test]
fn test_edit_failure_keeps_idle() {
    let mut session = MockSession::new(RUNNING).failing_on("edit_config");
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);

    let err = tx.edit(&to_sr2(), &description("new")).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::Transport);
    assert_eq!(tx.state(), TxState::Idle);
}

#[test]
fn test_serialization_error_sends_nothing() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);

    let err = tx.edit(&to_sr2(), &Node::scalar("not a mapping")).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::Serialization);
    assert!(session.calls.is_empty());
}

#[test]
fn test_discard_requires_verified() {
    let mut session = MockSession::new(RUNNING);
    let settings = Settings::default();
    let mut tx = TransactionCoordinator::new(&mut session, &settings);
    assert_eq!(tx.discard().unwrap_err().kind(), NcErrorKind::InvalidTransition);
}
