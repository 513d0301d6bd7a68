//! Structured logging facility for gqlx
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - `SpanTimer` for recording call duration on a span
//! - Test capture mode for deterministic assertions on events and spans
//!
//! # Usage
//!
//! ```rust
//! use gqlx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;
pub mod timer;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, CapturedSpan, TestCapture};
pub use timer::SpanTimer;
