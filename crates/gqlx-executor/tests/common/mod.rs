// Shared fake engines for bridge integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gqlx_core::{
    Engine, EngineError, ExecutionContext, FieldDescriptor, Request, Response, TxnContext,
};
use gqlx_executor::{BridgeConfig, ExecutionBridge};
use serde_json::json;
use tokio::sync::Notify;

/// What the engine observed about one `execute` call
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub ctx: ExecutionContext,
    pub request: Request,
    pub field: Option<FieldDescriptor>,
}

/// Records every call and echoes the query back as `{"echo": <query>}`.
/// Returns `fail_with` instead when set.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<SeenCall>>,
    pub commits: Mutex<Vec<TxnContext>>,
    pub fail_with: Option<EngineError>,
    pub txn_result: Option<Result<TxnContext, EngineError>>,
}

impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(err: EngineError) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(err),
            ..Self::default()
        })
    }

    pub fn finalizing(result: Result<TxnContext, EngineError>) -> Arc<Self> {
        Arc::new(Self {
            txn_result: Some(result),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<SeenCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Engine for RecordingEngine {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        request: &Request,
        field: Option<&FieldDescriptor>,
    ) -> Result<Response, EngineError> {
        self.calls.lock().unwrap().push(SeenCall {
            ctx: ctx.clone(),
            request: request.clone(),
            field: field.cloned(),
        });
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(Response::from_json(json!({ "echo": request.query })))
    }

    async fn commit_or_abort(
        &self,
        _ctx: &ExecutionContext,
        txn: TxnContext,
    ) -> Result<TxnContext, EngineError> {
        self.commits.lock().unwrap().push(txn.clone());
        match &self.txn_result {
            Some(result) => result.clone(),
            None => Ok(txn),
        }
    }
}

/// Blocks every `execute` until its context ends, then reports why.
#[derive(Default)]
pub struct BlockingEngine {
    pub entered: Notify,
    pub observed: Mutex<Vec<gqlx_core::ContextError>>,
}

#[async_trait]
impl Engine for BlockingEngine {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        _request: &Request,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Response, EngineError> {
        self.entered.notify_one();
        let why = ctx.done().await;
        self.observed.lock().unwrap().push(why);
        Err(why.into())
    }

    async fn commit_or_abort(
        &self,
        ctx: &ExecutionContext,
        _txn: TxnContext,
    ) -> Result<TxnContext, EngineError> {
        Err(ctx.done().await.into())
    }
}

/// Panics inside `execute`.
#[derive(Default)]
pub struct PanickingEngine {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Engine for PanickingEngine {
    async fn execute(
        &self,
        _ctx: &ExecutionContext,
        _request: &Request,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Response, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("engine invariant violated");
    }

    async fn commit_or_abort(
        &self,
        _ctx: &ExecutionContext,
        txn: TxnContext,
    ) -> Result<TxnContext, EngineError> {
        Ok(txn)
    }
}

pub fn bridge(engine: Arc<dyn Engine>) -> ExecutionBridge {
    ExecutionBridge::new(engine, BridgeConfig::default())
}

pub fn verbose_bridge(engine: Arc<dyn Engine>) -> ExecutionBridge {
    ExecutionBridge::new(engine, BridgeConfig::default().with_verbosity(3))
}
