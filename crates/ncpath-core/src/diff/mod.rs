//! Line diff between two textual renderings.
//!
//! ## Entry point
//!
//! ```
//! use ncpath_core::diff::unified_diff;
//!
//! let text = unified_diff("a\nb\n", "a\nc\n", "running", "candidate");
//! assert!(text.starts_with("--- running\n+++ candidate\n"));
//! ```
//!
//! ## Guarantees
//!
//! - **Empty on equality**: identical inputs yield an empty string, so
//!   "changed" can be read straight off the output.
//! - **Minimal**: hunks come from a shortest edit script, found in linear
//!   space so whole-datastore renderings can be compared.
//! - **Stable order**: inside a change, removed lines precede added lines.

pub mod engine;
pub mod model;
pub mod unified;

pub use engine::compute_hunks;
pub use model::{DiffLine, Hunk};
pub use unified::{unified_diff, CONTEXT_LINES};
