//! Intent Loading Tests
//!
//! ## Scenarios Covered
//!
//! 1. Host > group > global precedence with deep merge
//! 2. Targeting by group membership and host name
//! 3. Metadata keys are stripped from the resolved data
//! 4. Directory walk is recursive, sorted and YAML-only
//! 5. Invalid metadata is reported with the offending file

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ncpath_core::intent::{load_intent, load_intent_with_separator, load_yaml, HostContext};
use ncpath_core::{NcError, NcErrorKind, Node};
use std::fs;
use tempfile::TempDir;

const PATH: &str = "router/interface/interface-name=to_sr2";

fn write(dir: &TempDir, name: &str, body: &str) {
    let file = dir.path().join(name);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(file, body).unwrap();
}

fn host() -> HostContext {
    HostContext::new("sr1").with_group("core")
}

#[test]
fn test_precedence_host_over_group_over_global() {
    // GIVEN the same path targeted at all three scopes
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "global.yaml",
        &format!(
            "_path: {}\n_target_scope: GLOBAL\ndescription: global\nadmin-state: enable\n\
             ipv4:\n  primary:\n    prefix-length: 30\n",
            PATH
        ),
    );
    write(
        &dir,
        "group.yaml",
        &format!(
            "_path: {}\n_target_scope: group\n_target_groups: [core]\ndescription: group\n\
             ipv4:\n  primary:\n    address: 192.168.12.1\n    prefix-length: 31\n",
            PATH
        ),
    );
    write(
        &dir,
        "host.yaml",
        &format!(
            "_path: {}\n_target_scope: HOST\n_target_host: sr1\ndescription: host\n",
            PATH
        ),
    );

    // WHEN resolving for sr1
    let intents = load_intent(dir.path(), &host()).unwrap();

    // THEN one intent with the most specific values wins field by field
    assert_eq!(intents.len(), 1);
    let intent = intents.get(PATH).unwrap();
    assert_eq!(intent.path.to_string(), PATH);

    let data = intent.data.as_mapping().unwrap();
    assert_eq!(data.get("description"), Some(&Node::scalar("host")));
    assert_eq!(data.get("admin-state"), Some(&Node::scalar("enable")));

    let primary = data
        .get("ipv4")
        .and_then(Node::as_mapping)
        .and_then(|m| m.get("primary"))
        .and_then(Node::as_mapping)
        .unwrap();
    assert_eq!(primary.get("address"), Some(&Node::scalar("192.168.12.1")));
    assert_eq!(primary.get("prefix-length"), Some(&Node::scalar("31")));
}

#[test]
fn test_metadata_keys_are_stripped() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "a.yaml",
        "_path: router\n_target_scope: GROUP\n_target_groups: core\nrouter-name: Base\n",
    );

    let intents = load_intent(dir.path(), &host()).unwrap();
    let data = intents.get("router").unwrap().data.as_mapping().unwrap();
    let keys: Vec<&str> = data.keys().collect();
    assert_eq!(keys, vec!["router-name"]);
}

#[test]
fn test_untargeted_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "other-group.yaml",
        "_path: a\n_target_scope: GROUP\n_target_groups: [edge]\nx: 1\n",
    );
    write(
        &dir,
        "other-host.yaml",
        "_path: b\n_target_scope: HOST\n_target_host: sr2\nx: 1\n",
    );

    let intents = load_intent(dir.path(), &host()).unwrap();
    assert!(intents.is_empty());
}

#[test]
fn test_walk_is_recursive_and_yaml_only() {
    let dir = TempDir::new().unwrap();
    write(&dir, "nested/deeper/a.yml", "_path: a\n_target_scope: GLOBAL\nx: 1\n");
    write(&dir, "notes.txt", "_path: b\n_target_scope: GLOBAL\n");
    write(&dir, "plain.yaml", "just: data\n");

    let intents = load_intent(dir.path(), &host()).unwrap();
    let paths: Vec<&str> = intents.iter().map(|i| i.raw_path.as_str()).collect();
    assert_eq!(paths, vec!["a"]);
}

#[test]
fn test_first_file_wins_within_a_scope() {
    let dir = TempDir::new().unwrap();
    write(&dir, "10.yaml", "_path: a\n_target_scope: GLOBAL\nx: first\n");
    write(&dir, "20.yaml", "_path: a\n_target_scope: GLOBAL\nx: second\ny: extra\n");

    let intents = load_intent(dir.path(), &host()).unwrap();
    let data = intents.get("a").unwrap().data.as_mapping().unwrap();
    assert_eq!(data.get("x"), Some(&Node::scalar("first")));
    assert_eq!(data.get("y"), Some(&Node::scalar("extra")));
}

#[test]
fn test_missing_scope_is_invalid() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.yaml", "_path: a\nx: 1\n");

    let err = load_intent(dir.path(), &host()).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::InvalidIntent);
    match err {
        NcError::InvalidIntent { file, reason } => {
            assert!(file.ends_with("bad.yaml"));
            assert!(reason.contains("_target_scope"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_scope_is_invalid() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.yaml", "_path: a\n_target_scope: SITE\n");
    let err = load_intent(dir.path(), &host()).unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_INTENT");
}

#[test]
fn test_malformed_path_is_invalid_intent() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.yaml", "_path: a//b\n_target_scope: GLOBAL\n");
    let err = load_intent(dir.path(), &host()).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::InvalidIntent);
}

#[test]
fn test_configured_separator_splits_intent_paths() {
    // GIVEN an intent whose path uses '|' and a predicate value holding '/'
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "port.yaml",
        "_path: port|port-id=1/1/1\n_target_scope: GLOBAL\nadmin-state: enable\n",
    );

    // WHEN loaded with the matching separator
    let intents = load_intent_with_separator(dir.path(), &host(), '|').unwrap();

    // THEN the value keeps its slashes
    let paths: Vec<String> = intents.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["port/port-id=1/1/1"]);
    let last = intents.iter().next().unwrap().path.last().unwrap();
    assert_eq!(last.predicate().unwrap().value, "1/1/1");

    // AND the default separator splits the value apart
    let err = load_intent(dir.path(), &host()).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::InvalidIntent);
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_intent(&dir.path().join("absent"), &host()).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::Io);
}

#[test]
fn test_load_yaml_keeps_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.yaml", "zeta: 1\nalpha:\n  - a\n  - b\n");

    let node = load_yaml(&dir.path().join("doc.yaml")).unwrap();
    let m = node.as_mapping().unwrap();
    let keys: Vec<&str> = m.keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
    assert_eq!(
        m.get("alpha"),
        Some(&Node::Sequence(vec![Node::scalar("a"), Node::scalar("b")]))
    );
}

#[test]
fn test_load_yaml_rejects_bad_yaml() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.yaml", "a: [1, 2\n");
    let err = load_yaml(&dir.path().join("doc.yaml")).unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::InvalidIntent);
}
