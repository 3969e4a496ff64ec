use thiserror::Error;

use crate::model::Kind;

/// Result type alias using DynexError
pub type Result<T> = std::result::Result<T, DynexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Comparison
    /// The new snapshot has no data at all for a kind the old snapshot has
    MissingKind,
    /// A declared key mapping does not resolve to a concrete new identity
    Mapping,
    /// The same field holds incompatible value types across snapshots
    TypeMismatch,
    /// A record was diffed or paired against a record of another kind
    KindMismatch,

    // Key mapping
    DuplicateMapping,
    UnknownKind,
    InvalidToken,

    // Parser registry
    DuplicateParser,
    /// An external command parser reported a failure
    ParserFailed,

    // Validation
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingKind => "ERR_MISSING_KIND",
            ExErrorKind::Mapping => "ERR_MAPPING",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::KindMismatch => "ERR_KIND_MISMATCH",
            ExErrorKind::DuplicateMapping => "ERR_DUPLICATE_MAPPING",
            ExErrorKind::UnknownKind => "ERR_UNKNOWN_KIND",
            ExErrorKind::InvalidToken => "ERR_INVALID_TOKEN",
            ExErrorKind::DuplicateParser => "ERR_DUPLICATE_PARSER",
            ExErrorKind::ParserFailed => "ERR_PARSER_FAILED",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind signals a structural disagreement
    /// between snapshots that needs operator correction.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MissingKind | ExErrorKind::Mapping | ExErrorKind::TypeMismatch
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the domain
/// context (record kind, identity, field) that locates the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_kind: Option<String>,
    identity: Option<String>,
    field: Option<String>,
    command: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_kind: None,
            identity: None,
            field: None,
            command: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record kind context
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.record_kind = Some(kind.into());
        self
    }

    /// Add identity context (canonical string of the keying record)
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add command context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the record kind context, if any
    pub fn record_kind(&self) -> Option<&str> {
        self.record_kind.as_deref()
    }

    /// Get the identity context, if any
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the command context, if any
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = &self.record_kind {
            write!(f, " (kind: {})", kind)?;
        }
        if let Some(identity) = &self.identity {
            write!(f, " (identity: {})", identity)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failure reported by an external command parser.
///
/// The core never interprets this value; it is carried unchanged inside
/// [`DynexError::Parser`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error taxonomy for dynex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynexError {
    // ===== Comparison Errors =====
    /// The new snapshot lacks every record of a kind the old snapshot has
    #[error("New snapshot has no {kind} data")]
    MissingKind { kind: Kind },

    /// A key mapping entry does not resolve to a concrete new identity
    #[error("Mapping for {kind} key '{key}' does not resolve to a new identity")]
    Mapping { kind: Kind, key: String },

    /// A field holds values of incompatible types in the two snapshots
    #[error(
        "Type mismatch for {kind} '{identity}' field '{field}': {old_type} vs {new_type}"
    )]
    TypeMismatch {
        kind: Kind,
        identity: String,
        field: String,
        old_type: String,
        new_type: String,
    },

    /// Two records of different kinds were diffed or paired
    #[error("Kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    // ===== Key Mapping Errors =====
    /// The same old identity was mapped twice within one kind
    #[error("Duplicate mapping for {kind} key '{key}'")]
    DuplicateMapping { kind: Kind, key: String },

    /// A kind name that is not part of the record model
    #[error("Unknown record kind: {name}")]
    UnknownKind { name: String },

    /// Constructor arguments that cannot build a record of the kind
    #[error("Invalid {kind} token: {reason}")]
    InvalidToken { kind: Kind, reason: String },

    // ===== Parser Registry Errors =====
    /// Two parsers registered for the same command
    #[error("A parser is already registered for command '{command}'")]
    DuplicateParser { command: String },

    /// An external parser failed; the source is propagated as-is
    #[error("Parser for '{command}' failed: {source}")]
    Parser {
        command: String,
        #[source]
        source: ParseError,
    },

    // ===== IO Errors =====
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DynexError {
    /// Build an `Io` variant from a path and the underlying error
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        DynexError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from DynexError to ExError
///
/// Kind, identity, field and command move into the structured context; the
/// message keeps only what the context does not already carry.
impl From<DynexError> for ExError {
    fn from(err: DynexError) -> Self {
        match err {
            DynexError::MissingKind { kind } => ExError::new(ExErrorKind::MissingKind)
                .with_kind(kind.name())
                .with_message("New snapshot has no data for this kind"),

            DynexError::Mapping { kind, key } => ExError::new(ExErrorKind::Mapping)
                .with_kind(kind.name())
                .with_identity(key)
                .with_message("Mapping does not resolve to a new identity"),

            DynexError::TypeMismatch {
                kind,
                identity,
                field,
                old_type,
                new_type,
            } => ExError::new(ExErrorKind::TypeMismatch)
                .with_kind(kind.name())
                .with_identity(identity)
                .with_field(field)
                .with_message(format!("Type mismatch: {} vs {}", old_type, new_type)),

            DynexError::KindMismatch { expected, found } => {
                ExError::new(ExErrorKind::KindMismatch)
                    .with_kind(expected.name())
                    .with_message(format!("Kind mismatch: found {}", found))
            }

            DynexError::DuplicateMapping { kind, key } => {
                ExError::new(ExErrorKind::DuplicateMapping)
                    .with_kind(kind.name())
                    .with_identity(key)
                    .with_message("Duplicate mapping")
            }

            DynexError::UnknownKind { name } => ExError::new(ExErrorKind::UnknownKind)
                .with_kind(name)
                .with_message("Unknown record kind"),

            DynexError::InvalidToken { kind, reason } => ExError::new(ExErrorKind::InvalidToken)
                .with_kind(kind.name())
                .with_message(format!("Invalid token: {}", reason)),

            DynexError::DuplicateParser { command } => {
                ExError::new(ExErrorKind::DuplicateParser)
                    .with_command(command)
                    .with_message("A parser is already registered")
            }

            DynexError::Parser { command, source } => ExError::new(ExErrorKind::ParserFailed)
                .with_command(command)
                .with_message(format!("Parser failed: {}", source)),

            err @ DynexError::Io { .. } => {
                ExError::new(ExErrorKind::Io).with_message(err.to_string())
            }

            err @ DynexError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
            }
        }
    }
}

/// Conversion from serde_json::Error to DynexError
impl From<serde_json::Error> for DynexError {
    fn from(err: serde_json::Error) -> Self {
        DynexError::Serialization {
            message: err.to_string(),
        }
    }
}
