use thiserror::Error;

/// Result type alias using NcError
pub type Result<T> = std::result::Result<T, NcError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcErrorKind {
    // Addressing
    MalformedPath,
    InvalidPredicatePosition,

    // Navigation
    PathNotFound,
    PredicateRequired,
    PredicateNotFound,

    // Marshalling
    Serialization,
    MalformedReply,

    // Boundary validation
    InvalidDatastore,
    InvalidTransition,
    InvalidIntent,
    InvalidConfig,

    // Integration/IO
    Transport,
    Io,
}

impl NcErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            NcErrorKind::MalformedPath => "ERR_MALFORMED_PATH",
            NcErrorKind::InvalidPredicatePosition => "ERR_INVALID_PREDICATE_POSITION",
            NcErrorKind::PathNotFound => "ERR_PATH_NOT_FOUND",
            NcErrorKind::PredicateRequired => "ERR_PREDICATE_REQUIRED",
            NcErrorKind::PredicateNotFound => "ERR_PREDICATE_NOT_FOUND",
            NcErrorKind::Serialization => "ERR_SERIALIZATION",
            NcErrorKind::MalformedReply => "ERR_MALFORMED_REPLY",
            NcErrorKind::InvalidDatastore => "ERR_INVALID_DATASTORE",
            NcErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            NcErrorKind::InvalidIntent => "ERR_INVALID_INTENT",
            NcErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            NcErrorKind::Transport => "ERR_TRANSPORT",
            NcErrorKind::Io => "ERR_IO",
        }
    }

    /// Local-input errors are caused by what the caller passed in and are
    /// never worth retrying.
    pub fn is_local_input(&self) -> bool {
        !matches!(self, NcErrorKind::Transport | NcErrorKind::Io)
    }
}

/// Error taxonomy for path addressing, marshalling and transactions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NcError {
    // ===== Addressing =====
    /// Path string could not be lexed
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// A predicate segment appeared anywhere but the end of a filter path
    #[error("Predicate segment '{segment}' at position {position} is only legal on the last segment of a filter path")]
    InvalidPredicatePosition { segment: String, position: usize },

    // ===== Navigation =====
    /// Plain segment names a child that does not exist
    #[error("Path not found: no '{segment}' under '{parent}'")]
    PathNotFound { segment: String, parent: String },

    /// Plain segment reached a list without a predicate to pick an element
    #[error("Segment '{segment}' addresses a list under '{parent}'; a key=value predicate is required")]
    PredicateRequired { segment: String, parent: String },

    /// No list element matches a predicate
    #[error("No list element under '{parent}' matches {key}={value}")]
    PredicateNotFound {
        key: String,
        value: String,
        parent: String,
    },

    // ===== Marshalling =====
    /// Update structure cannot be represented as XML
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reply payload is not well-formed XML
    #[error("Malformed reply: {message}")]
    MalformedReply { message: String },

    // ===== Boundary validation =====
    /// Unrecognised datastore or read mode identifier
    #[error("Invalid datastore '{value}': expected one of {expected}")]
    InvalidDatastore { value: String, expected: String },

    /// Transaction state machine misuse
    #[error("Invalid transaction transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Intent file is missing metadata or has an unknown scope
    #[error("Invalid intent in {file}: {reason}")]
    InvalidIntent { file: String, reason: String },

    /// Settings file could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Integration =====
    /// Failure reported by the external session, surfaced unchanged
    #[error("Transport error during {op}: {message}")]
    Transport { op: String, message: String },

    /// Filesystem failure
    #[error("IO error during {op}: {message}")]
    Io { op: String, message: String },
}

impl NcError {
    /// Get the error kind
    pub fn kind(&self) -> NcErrorKind {
        match self {
            NcError::MalformedPath { .. } => NcErrorKind::MalformedPath,
            NcError::InvalidPredicatePosition { .. } => NcErrorKind::InvalidPredicatePosition,
            NcError::PathNotFound { .. } => NcErrorKind::PathNotFound,
            NcError::PredicateRequired { .. } => NcErrorKind::PredicateRequired,
            NcError::PredicateNotFound { .. } => NcErrorKind::PredicateNotFound,
            NcError::Serialization { .. } => NcErrorKind::Serialization,
            NcError::MalformedReply { .. } => NcErrorKind::MalformedReply,
            NcError::InvalidDatastore { .. } => NcErrorKind::InvalidDatastore,
            NcError::InvalidTransition { .. } => NcErrorKind::InvalidTransition,
            NcError::InvalidIntent { .. } => NcErrorKind::InvalidIntent,
            NcError::InvalidConfig { .. } => NcErrorKind::InvalidConfig,
            NcError::Transport { .. } => NcErrorKind::Transport,
            NcError::Io { .. } => NcErrorKind::Io,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Build a transport error; session implementations use this to hand
    /// their failures to the core.
    pub fn transport(op: impl Into<String>, message: impl std::fmt::Display) -> Self {
        NcError::Transport {
            op: op.into(),
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        NcError::Serialization {
            message: message.into(),
        }
    }

    pub(crate) fn io(op: impl Into<String>, err: std::io::Error) -> Self {
        NcError::Io {
            op: op.into(),
            message: err.to_string(),
        }
    }
}
