//! The seam between GraphQL resolvers and the graph engine.
//!
//! Resolvers hand over a request that has already been rewritten into the
//! engine's query/mutation form. `ExecutionBridge::execute` skips empty
//! requests, marks the context as GraphQL-originated, forwards to the engine
//! and normalizes the error. `commit_or_abort` is a plain pass-through.

use std::sync::Arc;

use gqlx_core::errors::{ExError, ExErrorKind};
use gqlx_core::logging_facility::SpanTimer;
use gqlx_core::{log_op_end, log_op_error, log_op_start};
use gqlx_core::{
    Engine, EngineError, ExecutionContext, FieldDescriptor, GqlError, GqlErrorList, Request,
    Response, TxnContext,
};
use gqlx_core_types::schema::{EVENT_DIAGNOSTIC, SPAN_EXECUTE};
use tracing::{Instrument, Level};

use crate::config::BridgeConfig;

const OP_EXECUTE: &str = "execute";

/// Prefix every wrapped (unstructured) engine error is reported under
pub const EXECUTION_FAILED: &str = "graph execution failed";

/// Error returned by [`ExecutionBridge::execute`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    /// Engine error that already is a GraphQL error list, passed through
    #[error(transparent)]
    GqlErrors(EngineError),
    /// Any other engine error, kept as the source
    #[error("graph execution failed because {0}")]
    ExecutionFailed(#[source] EngineError),
}

impl BridgeError {
    /// Pass GraphQL error lists through; wrap everything else.
    pub fn classify(err: EngineError) -> Self {
        if err.is_gql_error_list() {
            BridgeError::GqlErrors(err)
        } else {
            BridgeError::ExecutionFailed(err)
        }
    }

    /// The error exactly as the engine returned it
    pub fn engine_error(&self) -> &EngineError {
        match self {
            BridgeError::GqlErrors(err) | BridgeError::ExecutionFailed(err) => err,
        }
    }

    /// Data the engine returned together with the error, untouched
    pub fn partial_response(&self) -> Option<&Response> {
        self.engine_error().partial_response()
    }

    /// Render for the `errors` array of a GraphQL response
    pub fn to_gql_errors(&self) -> GqlErrorList {
        match self {
            BridgeError::GqlErrors(err) => err
                .downcast_ref::<GqlErrorList>()
                .cloned()
                .unwrap_or_else(|| GqlError::new(err.to_string()).into()),
            BridgeError::ExecutionFailed(err) => GqlErrorList::wrap(err.as_error(), EXECUTION_FAILED),
        }
    }
}

impl From<&BridgeError> for ExError {
    fn from(err: &BridgeError) -> Self {
        let kind = match err {
            BridgeError::GqlErrors(_) => ExErrorKind::GraphQl,
            BridgeError::ExecutionFailed(_) => ExErrorKind::ExecutionFailed,
        };
        let ex = ExError::new(kind)
            .with_op(OP_EXECUTE)
            .with_message(err.to_string());
        match err.engine_error().downcast_ref::<ExError>() {
            Some(cause) => ex.with_source(cause.clone()),
            None => ex,
        }
    }
}

impl From<BridgeError> for ExError {
    fn from(err: BridgeError) -> Self {
        ExError::from(&err)
    }
}

/// Stateless façade over an injected engine.
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// resolver calls.
pub struct ExecutionBridge {
    engine: Arc<dyn Engine>,
    config: BridgeConfig,
}

impl ExecutionBridge {
    pub fn new(engine: Arc<dyn Engine>, config: BridgeConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Forward a rewritten GraphQL request to the engine.
    ///
    /// Returns `Ok(None)` without calling the engine when `request` is absent
    /// or has neither query nor mutations. The engine sees a context derived
    /// with [`ExecutionContext::for_graphql`]. The call runs inside a
    /// `gqlx.execute` span that records `duration_ms` and closes on every
    /// exit path. Start/end events and the request rendering are only
    /// emitted at diagnostic verbosity.
    ///
    /// # Errors
    ///
    /// [`BridgeError::GqlErrors`] when the engine error is already a GraphQL
    /// error list, [`BridgeError::ExecutionFailed`] for any other engine
    /// error. Partial data the engine attached is available through
    /// [`BridgeError::partial_response`].
    pub async fn execute(
        &self,
        ctx: &ExecutionContext,
        request: Option<&Request>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<Response>, BridgeError> {
        let span = tracing::info_span!(
            parent: ctx.span(),
            SPAN_EXECUTE,
            request_id = %ctx.request_id(),
            namespace = ctx.namespace(),
            field = field.map(FieldDescriptor::response_name),
            duration_ms = tracing::field::Empty,
        );
        let timer = SpanTimer::start(&span);

        async move {
            let Some(request) = request.filter(|r| !r.is_empty()) else {
                return Ok(None);
            };

            // Timing lives on the span; events are diagnostics-only.
            let verbose = self.config.diagnostics_enabled();
            if verbose {
                log_op_start!(
                    OP_EXECUTE,
                    request_id = %ctx.request_id(),
                    mutation_count = request.mutations.len(),
                );
                if tracing::enabled!(Level::INFO) {
                    log_request(ctx, request);
                }
            }

            let graphql_ctx = ctx.for_graphql();
            let result = self
                .engine
                .execute(&graphql_ctx, request, field)
                .await
                .map(Some)
                .map_err(BridgeError::classify);

            if verbose {
                match &result {
                    Ok(_) => {
                        log_op_end!(
                            OP_EXECUTE,
                            duration_ms = timer.elapsed_ms(),
                            request_id = %ctx.request_id(),
                        );
                    }
                    Err(err) if tracing::enabled!(Level::WARN) => {
                        log_op_error!(
                            OP_EXECUTE,
                            err,
                            duration_ms = timer.elapsed_ms(),
                            request_id = %ctx.request_id(),
                        );
                    }
                    Err(_) => {}
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Commit or abort a transaction, returning the engine's answer untouched.
    ///
    /// # Errors
    ///
    /// Whatever the engine returns, unwrapped.
    pub async fn commit_or_abort(
        &self,
        ctx: &ExecutionContext,
        txn: TxnContext,
    ) -> Result<TxnContext, EngineError> {
        self.engine.commit_or_abort(ctx, txn).await
    }
}

// Only reached above the diagnostic threshold with INFO enabled; renders
// every mutation.
fn log_request(ctx: &ExecutionContext, request: &Request) {
    let mutations = request
        .mutations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    tracing::info!(
        component = module_path!(),
        op = OP_EXECUTE,
        event = EVENT_DIAGNOSTIC,
        request_id = %ctx.request_id(),
        query = %request.query,
        mutations = %mutations,
        "Executing graph request",
    );
}
