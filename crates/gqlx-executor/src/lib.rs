//! gqlx Executor - execution bridge between GraphQL resolvers and the graph engine
//!
//! Provides `ExecutionBridge`, the narrow seam resolvers call to run an
//! already-rewritten query/mutation request and to finalize transactions,
//! plus the `BridgeConfig` it is built with.

pub mod bridge;
pub mod config;

pub use bridge::{BridgeError, ExecutionBridge, EXECUTION_FAILED};
pub use config::{BridgeConfig, DIAGNOSTIC_VERBOSITY};
