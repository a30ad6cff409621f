//! Edit → verify → commit-or-discard workflow against the candidate datastore
//!
//! ```text
//! Idle --edit--> Edited --verify--> Verified --finish--> Committed
//!                                       |                (changed && !dry_run)
//!                                       +--finish/discard--> Discarded
//! ```
//!
//! A failed session call leaves the coordinator in the state it was in.
//! Nothing is retried and no partial commit is rolled back; after a failed
//! commit the caller decides whether to [`TransactionCoordinator::discard`].

use crate::compose::compose_config;
use crate::diff::unified_diff;
use crate::errors::{NcError, Result};
use crate::filter::compile_filter;
use crate::model::{Datastore, DefaultOperation, Node, Path, ReadMode};
use crate::projection::project;
use crate::session::NetconfSession;
use crate::settings::{Namespaces, Settings};
use crate::{log_op_end, log_op_error, log_op_start};
use ncpath_core_types::RequestId;
use serde::Serialize;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxState {
    Idle,
    Edited,
    Verified,
    Committed,
    Discarded,
}

impl TxState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxState::Idle => "idle",
            TxState::Edited => "edited",
            TxState::Verified => "verified",
            TxState::Committed => "committed",
            TxState::Discarded => "discarded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxState::Committed | TxState::Discarded)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a verified edit. `changed` is derived from the diff text and
/// cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    diff_text: String,
    changed: bool,
}

impl TransactionResult {
    pub fn from_diff(diff_text: String) -> Self {
        let changed = !diff_text.is_empty();
        Self { diff_text, changed }
    }

    pub fn diff_text(&self) -> &str {
        &self.diff_text
    }

    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Drives one edit through the candidate datastore.
///
/// A coordinator is single use: once it reaches `Committed` or `Discarded`
/// a new edit needs a new coordinator.
pub struct TransactionCoordinator<'a, S: NetconfSession + ?Sized> {
    session: &'a mut S,
    namespaces: Namespaces,
    default_operation: DefaultOperation,
    request_id: RequestId,
    state: TxState,
    path: Option<Path>,
    result: Option<TransactionResult>,
}

impl<'a, S: NetconfSession + ?Sized> TransactionCoordinator<'a, S> {
    pub fn new(session: &'a mut S, settings: &Settings) -> Self {
        Self {
            session,
            namespaces: settings.namespaces.clone(),
            default_operation: settings.default_operation,
            request_id: RequestId::new(),
            state: TxState::Idle,
            path: None,
            result: None,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Result of the last successful `verify`
    pub fn result(&self) -> Option<&TransactionResult> {
        self.result.as_ref()
    }

    /// Compose `update` under `path` and load it into the candidate datastore.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the coordinator is `Idle`
    /// - `Serialization` when the update cannot be written as XML
    /// - `Transport` when the session rejects the edit
    pub fn edit(&mut self, path: &Path, update: &Node) -> Result<()> {
        self.require(TxState::Idle, TxState::Edited)?;
        let config = compose_config(update, path, &self.namespaces)?;
        let request_id = self.request_id.clone();
        let default_operation = self.default_operation;
        let session = &mut *self.session;
        traced("edit_config", &request_id, || {
            session.edit_config(Datastore::Candidate, &config, default_operation)
        })?;
        self.path = Some(path.clone());
        self.state = TxState::Edited;
        Ok(())
    }

    /// Read `running` and `candidate` at the edited path and diff their JSON
    /// renderings. A subtree that exists on only one side compares as `{}`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the coordinator is `Edited`
    /// - `Transport` or `MalformedReply` from either read
    pub fn verify(&mut self) -> Result<&TransactionResult> {
        self.require(TxState::Edited, TxState::Verified)?;
        let path = self.path.clone().unwrap_or_else(Path::root);
        let request_id = self.request_id.clone();
        let namespaces = &self.namespaces;
        let session = &mut *self.session;

        let diff_text = traced("verify", &request_id, || {
            let running = read_for_compare(session, namespaces, Datastore::Running, &path)?;
            let candidate = read_for_compare(session, namespaces, Datastore::Candidate, &path)?;
            Ok(unified_diff(
                &running.to_pretty_json(),
                &candidate.to_pretty_json(),
                Datastore::Running.as_str(),
                Datastore::Candidate.as_str(),
            ))
        })?;

        let result = TransactionResult::from_diff(diff_text);
        tracing::debug!(
            request_id = request_id.as_str(),
            changed = result.changed(),
            "candidate verified"
        );
        self.state = TxState::Verified;
        Ok(self.result.insert(result))
    }

    /// Commit when there is something to commit and this is not a dry run,
    /// otherwise discard the candidate.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the coordinator is `Verified`
    /// - `Transport` when the commit or discard fails
    pub fn finish(&mut self, dry_run: bool) -> Result<TransactionResult> {
        let result = match (&self.result, self.state) {
            (Some(result), TxState::Verified) => result.clone(),
            _ => return Err(self.invalid(TxState::Committed)),
        };

        if result.changed() && !dry_run {
            let request_id = self.request_id.clone();
            let session = &mut *self.session;
            traced("commit", &request_id, || session.commit())?;
            self.state = TxState::Committed;
        } else {
            self.discard()?;
        }
        Ok(result)
    }

    /// Throw the candidate changes away.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the coordinator is `Verified`
    /// - `Transport` when the session cannot discard
    pub fn discard(&mut self) -> Result<()> {
        self.require(TxState::Verified, TxState::Discarded)?;
        let request_id = self.request_id.clone();
        let session = &mut *self.session;
        traced("discard_changes", &request_id, || session.discard_changes())?;
        self.state = TxState::Discarded;
        Ok(())
    }

    /// `edit`, `verify` and `finish` in one call.
    ///
    /// # Errors
    ///
    /// Any error of the three steps; the coordinator stays in the state
    /// reached before the failing step.
    pub fn apply(&mut self, path: &Path, update: &Node, dry_run: bool) -> Result<TransactionResult> {
        log_op_start!(
            "apply",
            request_id = self.request_id.as_str(),
            path = %path,
            dry_run = dry_run
        );
        let start = Instant::now();

        match self.run(path, update, dry_run) {
            Ok(result) => {
                log_op_end!(
                    "apply",
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = self.request_id.as_str(),
                    changed = result.changed(),
                    state = self.state.as_str()
                );
                Ok(result)
            }
            Err(e) => {
                log_op_error!(
                    "apply",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = self.request_id.as_str(),
                    state = self.state.as_str()
                );
                Err(e)
            }
        }
    }

    fn run(&mut self, path: &Path, update: &Node, dry_run: bool) -> Result<TransactionResult> {
        self.edit(path, update)?;
        self.verify()?;
        self.finish(dry_run)
    }

    fn require(&self, expected: TxState, to: TxState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(to))
        }
    }

    fn invalid(&self, to: TxState) -> NcError {
        NcError::InvalidTransition {
            from: self.state.to_string(),
            to: to.to_string(),
        }
    }
}

fn traced<T>(op: &'static str, request_id: &RequestId, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op, request_id = request_id.as_str());
    let start = Instant::now();
    match f() {
        Ok(value) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = request_id.as_str()
            );
            Ok(value)
        }
        Err(e) => {
            log_op_error!(
                op,
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = request_id.as_str()
            );
            Err(e)
        }
    }
}

fn read_for_compare<S: NetconfSession + ?Sized>(
    session: &mut S,
    namespaces: &Namespaces,
    datastore: Datastore,
    path: &Path,
) -> Result<Node> {
    let filter = compile_filter(&read_scope(path), ReadMode::Config, namespaces)?;
    let reply = session.get_config(datastore, &filter)?;
    match project(&reply, path, ReadMode::Config, None) {
        Err(NcError::PathNotFound { .. }) | Err(NcError::PredicateNotFound { .. }) => {
            Ok(Node::empty_mapping())
        }
        other => other,
    }
}

/// Edits accept a predicate anywhere in the path while read filters only
/// take one at the end. Reads for an edit therefore stop at the first
/// predicate and the projector walks the rest.
fn read_scope(path: &Path) -> Path {
    match path.segments().iter().position(|s| s.is_predicate()) {
        Some(idx) => Path::from_segments(path.segments()[..=idx].to_vec()),
        None => path.clone(),
    }
}
