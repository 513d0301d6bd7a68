//! Correlation ids carried by every bridge call
//!
//! A resolver mints a `RequestContext` once per GraphQL operation; the ids end
//! up on the execution span and on every structured log line the bridge emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh time-ordered (UUIDv7) id
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies a single resolver invocation that reached the bridge
    RequestId
);

correlation_id!(
    /// Identifies the distributed trace a request belongs to, when the caller has one
    TraceId
);

/// Correlation ids for one bridge call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an id minted upstream (e.g. by the HTTP layer)
    pub fn with_request_id(request_id: impl Into<RequestId>) -> Self {
        Self {
            request_id: request_id.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_display_matches_raw_value() {
        let id = RequestId::from("req-7");
        assert_eq!(id.to_string(), "req-7");
        assert_eq!(id.as_str(), "req-7");
    }

    #[test]
    fn test_context_keeps_upstream_ids() {
        let ctx = RequestContext::with_request_id("req-1").with_trace_id("trace-1");
        assert_eq!(ctx.request_id.as_str(), "req-1");
        assert_eq!(ctx.trace_id.as_ref().map(TraceId::as_str), Some("trace-1"));
    }

    #[test]
    fn test_fresh_context_has_no_trace() {
        let ctx = RequestContext::new();
        assert!(ctx.trace_id.is_none());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = TraceId::from("t-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t-42\"");
        let back: TraceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
