//! Shared utilities for integration tests: an in-process mock Nano node.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[allow(dead_code)]
pub const PRIVATE_KEY: &str = "9F0E444C69F77A49BD0BE89DB92C38FE713E0963165CCA12FAF5712D7657120F";
#[allow(dead_code)]
pub const ACCOUNT: &str = "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7";
#[allow(dead_code)]
pub const RECIPIENT: &str = "nano_1111111111111111111111111111111111111111111111111111hifc8npp";
#[allow(dead_code)]
pub const REPRESENTATIVE: &str =
    "xrb_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7";
#[allow(dead_code)]
pub const FRONTIER: &str = "991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948";
#[allow(dead_code)]
pub const WORK: &str = "2bf29ef00786a6bc";

type Handler =
    Arc<dyn Fn(Value) -> Pin<Box<dyn Future<Output = (u16, String)> + Send>> + Send + Sync>;

#[derive(Clone)]
struct NodeState {
    handler: Handler,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A running mock endpoint and the request bodies it has received.
pub struct MockNode {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[allow(dead_code)]
impl MockNode {
    /// All request bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// The `action` of every request received so far.
    pub fn actions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

async fn handle(State(state): State<NodeState>, body: String) -> (StatusCode, String) {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(request.clone());
    let (status, body) = (state.handler)(request).await;
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}

/// Start a programmable mock endpoint with async support on a random port.
pub async fn start_programmable_node<F, Fut>(f: F) -> MockNode
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let handler: Handler = Arc::new(
        move |request| -> Pin<Box<dyn Future<Output = (u16, String)> + Send>> {
            Box::pin(f(request))
        },
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = NodeState {
        handler,
        requests: requests.clone(),
    };

    let app = Router::new().route("/", post(handle)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode {
        url: format!("http://{}/", addr),
        requests,
    }
}

/// Start a mock endpoint answering synchronously with a status and JSON body.
#[allow(dead_code)]
pub async fn start_json_node<F>(f: F) -> MockNode
where
    F: Fn(&Value) -> (u16, Value) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    start_programmable_node(move |request| {
        let f = f.clone();
        async move {
            let (status, body) = f(&request);
            (status, body.to_string())
        }
    })
    .await
}

/// A node that knows one opened account with the given balance.
#[allow(dead_code)]
pub async fn start_ledger_node(balance: &'static str) -> MockNode {
    start_json_node(move |request| match request["action"].as_str() {
        Some("account_info") => (200, opened_account_info(balance)),
        Some("process") => (200, json!({ "hash": "F".repeat(64) })),
        _ => (200, json!({ "error": "Unknown command" })),
    })
    .await
}

/// A work server that always answers with `work`.
#[allow(dead_code)]
pub async fn start_work_server(work: &'static str) -> MockNode {
    start_json_node(move |request| match request["action"].as_str() {
        Some("work_generate") => (200, json!({ "work": work, "hash": request["hash"] })),
        _ => (200, json!({ "error": "Unknown command" })),
    })
    .await
}

#[allow(dead_code)]
pub fn opened_account_info(balance: &str) -> Value {
    json!({
        "frontier": FRONTIER,
        "open_block": FRONTIER,
        "representative_block": FRONTIER,
        "representative": REPRESENTATIVE,
        "balance": balance,
        "modified_timestamp": "1501793775",
        "block_count": "33",
        "confirmation_height": "28",
        "confirmation_height_frontier": FRONTIER,
        "account_version": "1"
    })
}
