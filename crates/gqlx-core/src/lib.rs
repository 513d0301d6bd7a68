//! gqlx Core - types and ports shared by the GraphQL execution bridge
//!
//! This crate provides:
//! - The request/response/transaction model exchanged with the graph engine
//! - `ExecutionContext`, the request-scoped state handed to the engine
//! - The `Engine` port and the `EngineFailure` classification capability
//! - GraphQL error lists (`GqlErrorList`)
//! - The canonical error facility (`ExError`) and structured logging facility

pub mod context;
pub mod engine;
pub mod errors;
pub mod gql_error;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use context::{ContextError, ExecutionContext};
pub use engine::{Engine, EngineError, EngineFailure};
pub use errors::{ExError, ExErrorKind, Result};
pub use gql_error::{GqlError, GqlErrorList, Location};
pub use model::{FieldDescriptor, Latency, Mutation, Request, Response, TxnContext, TxnState};
