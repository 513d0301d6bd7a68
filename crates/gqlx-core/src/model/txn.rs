use serde::{Deserialize, Serialize};

/// Lifecycle of an engine transaction as seen through `TxnContext`.
///
/// `Active` is initial; `Committed` and `Aborted` are terminal. The engine
/// owns the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnState {
    Active,
    Committed { commit_ts: u64 },
    Aborted,
}

/// Transaction handle plus the caller's commit/abort directive.
///
/// Sent to the engine with `aborted` set to the directive; the engine
/// answers with `commit_ts` filled in on a successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnContext {
    pub start_ts: u64,
    #[serde(default)]
    pub commit_ts: u64,
    #[serde(default)]
    pub aborted: bool,
    /// Conflict keys touched by the transaction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    /// Predicates touched by the transaction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preds: Vec<String>,
}

impl TxnContext {
    /// Directive to commit the transaction started at `start_ts`
    pub fn commit(start_ts: u64) -> Self {
        Self {
            start_ts,
            ..Self::default()
        }
    }

    /// Directive to abort the transaction started at `start_ts`
    pub fn abort(start_ts: u64) -> Self {
        Self {
            start_ts,
            aborted: true,
            ..Self::default()
        }
    }

    pub fn state(&self) -> TxnState {
        if self.aborted {
            TxnState::Aborted
        } else if self.commit_ts > 0 {
            TxnState::Committed {
                commit_ts: self.commit_ts,
            }
        } else {
            TxnState::Active
        }
    }
}
