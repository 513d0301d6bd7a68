//! Request-scoped execution context.
//!
//! Carries cancellation, deadline, caller identity, correlation ids and the
//! tracing span from the resolver down into the engine. Whether a request
//! came from the GraphQL layer is an explicit field (`is_graphql`) rather
//! than an ambient key, and it is set through [`ExecutionContext::for_graphql`].

use std::future::Future;
use std::time::Duration;

use gqlx_core_types::{RequestContext, RequestId, Sensitive};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Span;

use crate::engine::EngineFailure;

/// Why a context stopped being live
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl EngineFailure for ContextError {}

/// Ambient state for one resolver call.
///
/// Clones share the cancellation token: cancelling any of them cancels all.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
    namespace: u64,
    auth_token: Option<Sensitive<String>>,
    correlation: RequestContext,
    span: Span,
    graphql: bool,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// Fresh context: new token, no deadline, root namespace, no span
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: None,
            namespace: 0,
            auth_token: None,
            correlation: RequestContext::new(),
            span: Span::none(),
            graphql: false,
        }
    }

    /// Tie this context to a token owned by the caller (e.g. the HTTP connection)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_namespace(mut self, namespace: u64) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(Sensitive::new(token.into()));
        self
    }

    pub fn with_correlation(mut self, correlation: RequestContext) -> Self {
        self.correlation = correlation;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Derived context for a request originating in the GraphQL layer.
    ///
    /// Everything else, including the cancellation token, is shared with
    /// `self`.
    pub fn for_graphql(&self) -> Self {
        Self {
            graphql: true,
            ..self.clone()
        }
    }

    pub fn is_graphql(&self) -> bool {
        self.graphql
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn namespace(&self) -> u64 {
        self.namespace
    }

    pub fn auth_token(&self) -> Option<&Sensitive<String>> {
        self.auth_token.as_ref()
    }

    pub fn correlation(&self) -> &RequestContext {
        &self.correlation
    }

    pub fn request_id(&self) -> &RequestId {
        &self.correlation.request_id
    }

    /// Span of the caller; `Span::none()` when it has none
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }

    /// `Ok(())` while the context is live.
    ///
    /// # Errors
    ///
    /// `Cancelled` once the token fires, `DeadlineExceeded` once the deadline
    /// has passed. Cancellation is reported first when both hold.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.cancel.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Resolves once the context is cancelled or its deadline elapses.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.cancel.cancelled() => ContextError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.cancel.cancelled().await;
                ContextError::Cancelled
            }
        }
    }

    /// Drive `fut` to completion unless the context ends first.
    ///
    /// # Errors
    ///
    /// The `ContextError` that ended the context; `fut` is dropped.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ContextError> {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}
