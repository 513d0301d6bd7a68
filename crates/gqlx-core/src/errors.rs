use gqlx_core_types::{RequestId, TraceId};

use crate::context::ContextError;
use crate::engine::EngineFailure;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that crosses the bridge, whether raised by the engine or by
/// the bridge's own ambient code (config loading, context checks), maps to
/// one of these kinds and its stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Request/Config
    InvalidInput,
    InvalidConfig,

    // Context
    Cancelled,
    DeadlineExceeded,

    // Execution
    /// Unstructured engine failure, wrapped by the bridge
    ExecutionFailed,
    /// Engine failure already shaped as a GraphQL error list
    GraphQl,

    // Transactions
    TxnAborted,
    TxnConflict,

    // Lookup/Auth
    NotFound,
    Unauthorised,
    Forbidden,

    // Integration/IO
    Persistence,
    Io,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::DeadlineExceeded => "ERR_DEADLINE_EXCEEDED",
            ExErrorKind::ExecutionFailed => "ERR_EXECUTION_FAILED",
            ExErrorKind::GraphQl => "ERR_GRAPHQL",
            ExErrorKind::TxnAborted => "ERR_TXN_ABORTED",
            ExErrorKind::TxnConflict => "ERR_TXN_CONFLICT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional request context
/// (operation, namespace, transaction start timestamp, correlation ids).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    namespace: Option<u64>,
    start_ts: Option<u64>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            namespace: None,
            start_ts: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the namespace the failing request ran in
    pub fn with_namespace(mut self, namespace: u64) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Add the transaction start timestamp
    pub fn with_start_ts(mut self, start_ts: u64) -> Self {
        self.start_ts = Some(start_ts);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
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

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn namespace(&self) -> Option<u64> {
        self.namespace
    }

    pub fn start_ts(&self) -> Option<u64> {
        self.start_ts
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

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
        if let Some(namespace) = self.namespace {
            write!(f, " (namespace: {})", namespace)?;
        }
        if let Some(start_ts) = self.start_ts {
            write!(f, " (start_ts: {})", start_ts)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// An `ExError` returned by an engine is opaque to the GraphQL layer.
impl EngineFailure for ExError {}

impl From<ContextError> for ExError {
    fn from(err: ContextError) -> Self {
        let kind = match err {
            ContextError::Cancelled => ExErrorKind::Cancelled,
            ContextError::DeadlineExceeded => ExErrorKind::DeadlineExceeded,
        };
        ExError::new(kind).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========
