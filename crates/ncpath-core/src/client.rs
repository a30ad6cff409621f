//! Device-facing surface: path-addressed reads, comparisons and edits over
//! one session.

use crate::diff::unified_diff;
use crate::errors::Result;
use crate::filter::compile_filter;
use crate::intent::IntentSet;
use crate::model::{Datastore, Node, Path, ReadMode};
use crate::projection::project;
use crate::reduce::ReduceSpec;
use crate::session::NetconfSession;
use crate::settings::Settings;
use crate::transaction::{TransactionCoordinator, TransactionResult};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fmt;
use std::time::Instant;

/// Where a read is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    /// `<get-config>` against a datastore
    Config(Datastore),
    /// `<get>` of operational state
    State,
}

impl ReadSource {
    fn mode(&self) -> ReadMode {
        match self {
            ReadSource::Config(_) => ReadMode::Config,
            ReadSource::State => ReadMode::State,
        }
    }
}

impl fmt::Display for ReadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadSource::Config(ds) => write!(f, "{}", ds),
            ReadSource::State => f.write_str("state"),
        }
    }
}

/// One side of a [`NcClient::compare`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompareSide {
    Datastore(Datastore),
    Literal(Node),
}

impl CompareSide {
    fn label(&self) -> &str {
        match self {
            CompareSide::Datastore(ds) => ds.as_str(),
            CompareSide::Literal(_) => "literal",
        }
    }
}

pub struct NcClient<S: NetconfSession> {
    session: S,
    settings: Settings,
}

impl<S: NetconfSession> NcClient<S> {
    pub fn new(session: S, settings: Settings) -> Self {
        Self { session, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Read the subtree at `path` from `source`.
    ///
    /// # Errors
    ///
    /// - `InvalidPredicatePosition` when a predicate is not the last segment
    /// - `Transport` from the session
    /// - projection errors (`MalformedReply`, `PathNotFound`,
    ///   `PredicateRequired`, `PredicateNotFound`)
    pub fn read(&mut self, source: ReadSource, path: &Path, reduce: Option<&ReduceSpec>) -> Result<Node> {
        log_op_start!("read", source = %source, path = %path);
        let start = Instant::now();

        let result = self.read_impl(source, path, reduce).map_err(|e| {
            log_op_error!(
                "read",
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                source = %source,
                path = %path
            );
            e
        })?;

        log_op_end!("read", duration_ms = start.elapsed().as_millis() as u64);
        Ok(result)
    }

    /// # Errors
    ///
    /// As [`NcClient::read`].
    pub fn get_config(
        &mut self,
        datastore: Datastore,
        path: &Path,
        reduce: Option<&ReduceSpec>,
    ) -> Result<Node> {
        self.read(ReadSource::Config(datastore), path, reduce)
    }

    /// # Errors
    ///
    /// As [`NcClient::read`].
    pub fn get(&mut self, path: &Path, reduce: Option<&ReduceSpec>) -> Result<Node> {
        self.read(ReadSource::State, path, reduce)
    }

    /// Unified diff of the JSON renderings of `source` and `destination` at
    /// `path`; empty when they agree.
    ///
    /// # Errors
    ///
    /// As [`NcClient::read`] for each datastore side.
    pub fn compare(
        &mut self,
        source: &CompareSide,
        destination: &CompareSide,
        path: &Path,
    ) -> Result<String> {
        let before = self.resolve(source, path)?;
        let after = self.resolve(destination, path)?;
        Ok(unified_diff(
            &before.to_pretty_json(),
            &after.to_pretty_json(),
            source.label(),
            destination.label(),
        ))
    }

    /// A fresh coordinator borrowing this client's session.
    pub fn transaction(&mut self) -> TransactionCoordinator<'_, S> {
        TransactionCoordinator::new(&mut self.session, &self.settings)
    }

    /// Edit, verify, then commit or discard `update` at `path`.
    ///
    /// # Errors
    ///
    /// See [`TransactionCoordinator::apply`].
    pub fn apply(&mut self, path: &Path, update: &Node, dry_run: bool) -> Result<TransactionResult> {
        self.transaction().apply(path, update, dry_run)
    }

    /// Apply each intent in its own transaction, in order. Stops at the
    /// first failure.
    ///
    /// # Errors
    ///
    /// The first error any intent's transaction returns.
    pub fn apply_intents(
        &mut self,
        intents: &IntentSet,
        dry_run: bool,
    ) -> Result<Vec<(String, TransactionResult)>> {
        let mut results = Vec::with_capacity(intents.len());
        for intent in intents {
            let result = self.apply(&intent.path, &intent.data, dry_run)?;
            results.push((intent.raw_path.clone(), result));
        }
        Ok(results)
    }

    fn read_impl(&mut self, source: ReadSource, path: &Path, reduce: Option<&ReduceSpec>) -> Result<Node> {
        let mode = source.mode();
        let filter = compile_filter(path, mode, &self.settings.namespaces)?;
        let reply = match source {
            ReadSource::Config(datastore) => self.session.get_config(datastore, &filter)?,
            ReadSource::State => self.session.get(&filter)?,
        };
        project(&reply, path, mode, reduce)
    }

    fn resolve(&mut self, side: &CompareSide, path: &Path) -> Result<Node> {
        match side {
            CompareSide::Datastore(ds) => self.get_config(*ds, path, None),
            CompareSide::Literal(node) => Ok(node.clone()),
        }
    }
}
