//! ncpath core - path-addressed NETCONF reads and transactional edits
//!
//! This crate turns slash-separated paths such as
//! `router/interface/interface-name=to_sr2` into XML subtree filters,
//! projects the device's XML replies back into nested, ordered trees rooted
//! at the addressed node, and composes partial updates into the
//! `<edit-config>` payloads a device expects:
//! - Path lexing with `key=value` list predicates
//! - Filter compilation and reply projection with depth/exclusion bounding
//! - Update composition for the candidate datastore
//! - Edit → verify → commit-or-discard transactions with dry-run
//! - Intent file resolution per host
//!
//! The NETCONF session itself is supplied by the caller through
//! [`session::NetconfSession`].

pub mod client;
pub mod compose;
pub mod diff;
pub mod errors;
pub mod filter;
pub mod intent;
pub mod logging_facility;
pub mod model;
pub mod projection;
pub mod reduce;
pub mod session;
pub mod settings;
pub mod transaction;
pub mod xml;

// The logging macros name the schema through `$crate`.
pub use ncpath_core_types;

// Re-export commonly used types
pub use client::{CompareSide, NcClient, ReadSource};
pub use compose::{compose_config, compose_update};
pub use errors::{NcError, NcErrorKind, Result};
pub use filter::{compile_filter, Filter};
pub use intent::{load_intent, load_intent_with_separator, load_yaml, HostContext, Intent, IntentSet};
pub use model::{Datastore, DefaultOperation, Mapping, Node, Path, PathSegment, Predicate, ReadMode};
pub use projection::{project, project_raw};
pub use reduce::{reduce, ReduceSpec};
pub use session::NetconfSession;
pub use settings::Settings;
pub use transaction::{TransactionCoordinator, TransactionResult, TxState};
