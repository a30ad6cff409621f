//! Canonical schema constants for structured logging
//!
//! These constants keep field names identical across every log line the
//! engine emits.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Addressing
pub const FIELD_PATH: &str = "path";
pub const FIELD_DATASTORE: &str = "datastore";
pub const FIELD_MODE: &str = "mode";

// Transaction outcome
pub const FIELD_CHANGED: &str = "changed";
pub const FIELD_DRY_RUN: &str = "dry_run";
pub const FIELD_STATE: &str = "state";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
