// Integration tests for ExecutionBridge::commit_or_abort.
// The bridge adds nothing: the engine's answer comes back as is.

mod common;

use common::{bridge, RecordingEngine};
use gqlx_core::errors::{ExError, ExErrorKind};
use gqlx_core::{EngineError, ExecutionContext, GqlError, GqlErrorList, TxnContext, TxnState};

#[tokio::test]
async fn test_commit_is_forwarded_and_returned_unchanged() {
    let engine = RecordingEngine::new();
    let bridge = bridge(engine.clone());
    let txn = TxnContext::commit(17);

    let out = bridge
        .commit_or_abort(&ExecutionContext::new(), txn.clone())
        .await
        .unwrap();

    assert_eq!(out, txn);
    assert_eq!(out.state(), TxnState::Active);
    assert_eq!(engine.commits.lock().unwrap().as_slice(), &[txn]);
}

#[tokio::test]
async fn test_abort_is_forwarded_and_returned_unchanged() {
    let engine = RecordingEngine::new();
    let bridge = bridge(engine.clone());
    let txn = TxnContext::abort(23);

    let out = bridge
        .commit_or_abort(&ExecutionContext::new(), txn.clone())
        .await
        .unwrap();

    assert_eq!(out, txn);
    assert_eq!(out.state(), TxnState::Aborted);
}

#[tokio::test]
async fn test_engine_result_is_returned_as_is() {
    let finalized = TxnContext {
        commit_ts: 31,
        ..TxnContext::commit(30)
    };
    let engine = RecordingEngine::finalizing(Ok(finalized.clone()));
    let bridge = bridge(engine);

    let out = bridge
        .commit_or_abort(&ExecutionContext::new(), TxnContext::commit(30))
        .await
        .unwrap();

    assert_eq!(out, finalized);
    assert_eq!(out.state(), TxnState::Committed { commit_ts: 31 });
}

#[tokio::test]
async fn test_error_is_not_wrapped() {
    let engine_err: EngineError = ExError::new(ExErrorKind::TxnAborted)
        .with_start_ts(40)
        .with_message("transaction has been aborted")
        .into();
    let engine = RecordingEngine::finalizing(Err(engine_err.clone()));
    let bridge = bridge(engine);

    let err = bridge
        .commit_or_abort(&ExecutionContext::new(), TxnContext::commit(40))
        .await
        .unwrap_err();

    assert!(EngineError::ptr_eq(&err, &engine_err));
    assert_eq!(err.to_string(), engine_err.to_string());
    assert!(!err.to_string().contains("execution failed"));
}

#[tokio::test]
async fn test_graphql_error_list_is_not_wrapped_either() {
    let engine_err: EngineError = GqlErrorList::from(GqlError::new("conflict")).into();
    let engine = RecordingEngine::finalizing(Err(engine_err.clone()));
    let bridge = bridge(engine);

    let err = bridge
        .commit_or_abort(&ExecutionContext::new(), TxnContext::abort(5))
        .await
        .unwrap_err();

    assert!(EngineError::ptr_eq(&err, &engine_err));
}

#[tokio::test]
async fn test_caller_context_is_not_marked_graphql() {
    let engine = RecordingEngine::new();
    let bridge = bridge(engine);
    let ctx = ExecutionContext::new().with_namespace(9);

    bridge
        .commit_or_abort(&ctx, TxnContext::commit(1))
        .await
        .unwrap();

    assert!(!ctx.is_graphql());
}
