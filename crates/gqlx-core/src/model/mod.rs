//! Request/response model exchanged between the bridge and the engine
//!
//! All of these are constructed upstream (by the GraphQL-to-engine rewriting
//! step) or by the engine; the bridge only reads them.

pub mod field;
pub mod request;
pub mod response;
pub mod txn;

pub use field::FieldDescriptor;
pub use request::{Mutation, Request};
pub use response::{Latency, Response};
pub use txn::{TxnContext, TxnState};
