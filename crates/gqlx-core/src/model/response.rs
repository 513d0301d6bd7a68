use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::txn::TxnContext;

/// Server-side timing breakdown, in nanoseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latency {
    pub parsing_ns: u64,
    pub processing_ns: u64,
    pub encoding_ns: u64,
    pub assign_timestamp_ns: u64,
    pub total_ns: u64,
}

/// What the engine returned for a request.
///
/// The bridge hands this back to the resolver without looking inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub json: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn: Option<TxnContext>,
    /// Blank-node name → assigned uid, for mutations that created nodes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub uids: BTreeMap<String, String>,
    #[serde(default)]
    pub latency: Latency,
}

impl Response {
    pub fn from_json(json: serde_json::Value) -> Self {
        Self {
            json,
            ..Self::default()
        }
    }

    pub fn with_txn(mut self, txn: TxnContext) -> Self {
        self.txn = Some(txn);
        self
    }

    pub fn with_uid(mut self, blank_node: impl Into<String>, uid: impl Into<String>) -> Self {
        self.uids.insert(blank_node.into(), uid.into());
        self
    }
}
