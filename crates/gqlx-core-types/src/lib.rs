//! Core types shared by the gqlx bridge crates
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Sensitive data**: Sensitive<T> marker for credentials carried in the execution context
//! - **Schema constants**: canonical structured-log field keys, event and span names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
