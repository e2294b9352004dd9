//! In-process transport with per-endpoint scripted replies.

use futures::FutureExt;
use futures::future::BoxFuture;
use notekit_runtime::transport::{
    ApiRequest, Method, Transport, TransportError, TransportResult, UploadRequest,
};
use notekit_types::ApiResponse;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// One call seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub payload: Value,
    pub file: Option<PathBuf>,
    pub form: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Result(TransportResult),
    /// Never answers; for exercising timeouts.
    Hang,
}

/// Transport that answers from a script instead of the network.
///
/// Replies queued with [`respond`](Self::respond) and friends are consumed in
/// order per endpoint; once a queue is empty the endpoint's
/// [`always`](Self::always) reply is used, and failing that an empty
/// success. [`hold`](Self::hold) keeps every call pending until
/// [`release`](Self::release).
pub struct ScriptedTransport {
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    fallback: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: watch::Sender<bool>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedTransport {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            queued: Mutex::new(HashMap::new()),
            fallback: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            gate,
        }
    }

    fn queue(&self, endpoint: &str, reply: Reply) -> &Self {
        lock(&self.queued)
            .entry(endpoint.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a 2xx body, interpreted the way the HTTP transport does.
    pub fn respond(&self, endpoint: &str, body: Value) -> &Self {
        self.queue(endpoint, Reply::Result(Ok(ApiResponse::from_body(body))))
    }

    pub fn fail(&self, endpoint: &str, error: TransportError) -> &Self {
        self.queue(endpoint, Reply::Result(Err(error)))
    }

    pub fn hang(&self, endpoint: &str) -> &Self {
        self.queue(endpoint, Reply::Hang)
    }

    /// Reply used whenever the endpoint's queue is empty.
    pub fn always(&self, endpoint: &str, body: Value) -> &Self {
        lock(&self.fallback).insert(
            endpoint.to_string(),
            Reply::Result(Ok(ApiResponse::from_body(body))),
        );
        self
    }

    /// Keep calls pending until [`release`](Self::release).
    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Yield until at least `count` calls have been recorded.
    pub async fn wait_for_calls(&self, count: usize) {
        for _ in 0..10_000 {
            if self.call_count() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!(
            "expected {} calls, saw {}: {:?}",
            count,
            self.call_count(),
            self.calls()
        );
    }

    fn next_reply(&self, endpoint: &str) -> Reply {
        if let Some(reply) = lock(&self.queued)
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }
        lock(&self.fallback)
            .get(endpoint)
            .cloned()
            .unwrap_or(Reply::Result(Ok(ApiResponse::Success {
                data: Value::Null,
                message: None,
            })))
    }

    async fn answer(&self, call: RecordedCall) -> TransportResult {
        let endpoint = call.endpoint.clone();
        lock(&self.calls).push(call);

        let mut gate = self.gate.subscribe();
        loop {
            if *gate.borrow_and_update() {
                break;
            }
            if gate.changed().await.is_err() {
                break;
            }
        }

        match self.next_reply(&endpoint) {
            Reply::Result(result) => result,
            Reply::Hang => futures::future::pending().await,
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, TransportResult> {
        self.answer(RecordedCall {
            method: request.method,
            endpoint: request.endpoint,
            payload: request.payload,
            file: None,
            form: BTreeMap::new(),
        })
        .boxed()
    }

    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, TransportResult> {
        self.answer(RecordedCall {
            method: Method::Post,
            endpoint: request.endpoint,
            payload: Value::Null,
            file: Some(request.file_path),
            form: request.form,
        })
        .boxed()
    }
}
