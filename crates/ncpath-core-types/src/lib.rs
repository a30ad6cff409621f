//! Core types shared across ncpath facilities
//!
//! - **Correlation types**: RequestId for tying transaction log lines together
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
