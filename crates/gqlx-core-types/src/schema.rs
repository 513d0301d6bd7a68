//! Canonical field keys, event names and span names for structured logging

// Operation envelope
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Diagnostic request rendering
pub const FIELD_QUERY: &str = "query";
pub const FIELD_MUTATIONS: &str = "mutations";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DIAGNOSTIC: &str = "diagnostic";

// Span names
pub const SPAN_EXECUTE: &str = "gqlx.execute";
