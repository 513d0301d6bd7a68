//! The engine port the bridge forwards to.
//!
//! The graph engine (query processing, mutations, transaction commit) lives
//! behind the `Engine` trait so the bridge can be built against any
//! implementation, including in-process test doubles.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ExecutionContext;
use crate::model::{FieldDescriptor, Request, Response, TxnContext};

/// Capability trait for errors an engine may return.
///
/// `is_gql_error_list` tells the bridge whether the error is already a list
/// of user-facing GraphQL errors (and must be passed through untouched) or
/// an opaque failure that gets wrapped. New structured kinds opt in by
/// overriding it.
pub trait EngineFailure: StdError + Send + Sync + 'static {
    fn is_gql_error_list(&self) -> bool {
        false
    }
}

/// Reference-counted handle over an engine failure.
///
/// Cloning shares the same allocation, so a passed-through error stays
/// reference-identical to what the engine produced (see [`EngineError::ptr_eq`]).
///
/// An engine that produced data before failing (typically a GraphQL error
/// list next to a partially resolved result) attaches it with
/// [`EngineError::with_partial_response`]; it travels with the error
/// unmodified.
#[derive(Clone)]
pub struct EngineError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    gql_error_list: bool,
    partial: Option<Arc<Response>>,
}

impl EngineError {
    pub fn new<E: EngineFailure>(err: E) -> Self {
        let gql_error_list = err.is_gql_error_list();
        Self {
            inner: Arc::new(err),
            gql_error_list,
            partial: None,
        }
    }

    /// Attach the response the engine built before the error
    pub fn with_partial_response(mut self, response: Response) -> Self {
        self.partial = Some(Arc::new(response));
        self
    }

    /// Data returned alongside the error, if any
    pub fn partial_response(&self) -> Option<&Response> {
        self.partial.as_deref()
    }

    /// Result of the wrapped error's `EngineFailure::is_gql_error_list`
    pub fn is_gql_error_list(&self) -> bool {
        self.gql_error_list
    }

    /// True when both handles point at the same underlying error value
    pub fn ptr_eq(a: &EngineError, b: &EngineError) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        (*self.inner).downcast_ref::<E>()
    }

    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }
}

impl<E: EngineFailure> From<E> for EngineError {
    fn from(err: E) -> Self {
        EngineError::new(err)
    }
}

impl fmt::Debug for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl StdError for EngineError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// Query/mutation execution and transaction finalization.
///
/// Implementations must accept an empty `Request` (the bridge never sends
/// one) and must stop work once `ctx` is cancelled or past its deadline.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run the request's query and mutations and return the JSON response.
    ///
    /// `field` is the GraphQL field being resolved; `None` for direct
    /// (non-GraphQL) execution. Partial data produced before a failure goes
    /// on the error via [`EngineError::with_partial_response`].
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        request: &Request,
        field: Option<&FieldDescriptor>,
    ) -> Result<Response, EngineError>;

    /// Commit or abort the transaction identified by `txn.start_ts`,
    /// according to `txn.aborted`.
    async fn commit_or_abort(
        &self,
        ctx: &ExecutionContext,
        txn: TxnContext,
    ) -> Result<TxnContext, EngineError>;
}
