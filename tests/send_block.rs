//! End-to-end send block generation against mock node and work server.

use async_trait::async_trait;
use serde_json::json;
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nano_send::config::WorkThreshold;
use nano_send::crypto::verify_block_signature;
use nano_send::error::{BoxError, ErrorKind, NanoError, WorkFailure};
use nano_send::{HelperConfig, NanoHelper, NanoResult, WorkContext, WorkGenerator, WorkHook};

mod common;
use common::*;

fn helper_for(node: &MockNode, work: &MockNode, threshold: u64) -> NanoHelper {
    let config = HelperConfig {
        rpc_url: Some(node.url.clone()),
        work_generation_url: Some(work.url.clone()),
        work_threshold: WorkThreshold(threshold),
        ..HelperConfig::default()
    };
    let mut helper = NanoHelper::new(config).unwrap();
    helper.set_private_key(PRIVATE_KEY).unwrap();
    helper
}

struct Recorder {
    label: &'static str,
    log: Arc<Mutex<Vec<(&'static str, WorkContext)>>>,
}

#[async_trait]
impl WorkHook for Recorder {
    async fn call(&self, context: &mut WorkContext) -> NanoResult<()> {
        self.log.lock().unwrap().push((self.label, context.clone()));
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl WorkHook for Failing {
    async fn call(&self, _context: &mut WorkContext) -> NanoResult<()> {
        Err(NanoError::Hook("blocked by policy".into()))
    }
}

struct Counter(Arc<AtomicUsize>);

#[async_trait]
impl WorkHook for Counter {
    async fn call(&self, _context: &mut WorkContext) -> NanoResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Reroute;

#[async_trait]
impl WorkHook for Reroute {
    async fn call(&self, context: &mut WorkContext) -> NanoResult<()> {
        context.balance = "25".into();
        context.representative = RECIPIENT.into();
        Ok(())
    }
}

#[tokio::test]
async fn test_generate_send_block() {
    let node = start_ledger_node("2000000000000000000000000000000").await;
    let work = start_work_server(WORK).await;
    let helper = helper_for(&node, &work, 0);

    let block = helper
        .generate_send_block(RECIPIENT, "1000000000000000000000000000000")
        .await
        .unwrap();

    assert_eq!(block.block_type, "state");
    assert_eq!(block.account, ACCOUNT);
    assert_eq!(block.previous, FRONTIER);
    assert_eq!(block.representative, REPRESENTATIVE);
    assert_eq!(block.balance, "1000000000000000000000000000000");
    assert_eq!(block.link, "0".repeat(64));
    assert_eq!(block.link_as_account.as_deref(), Some(RECIPIENT));
    assert_eq!(block.work, WORK);
    assert!(verify_block_signature(&block));

    assert_eq!(
        node.requests(),
        vec![json!({"action": "account_info", "account": ACCOUNT, "representative": "true"})]
    );
    assert_eq!(
        work.requests(),
        vec![json!({"action": "work_generate", "hash": FRONTIER})]
    );
}

#[tokio::test]
async fn test_process_block_returns_hash() {
    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let helper = helper_for(&node, &work, 0);

    let block = helper.generate_send_block(RECIPIENT, "30").await.unwrap();
    assert_eq!(block.balance, "20");

    let hash = helper.process_block(&block).await.unwrap();
    assert_eq!(hash, "F".repeat(64));

    let process = &node.requests()[1];
    assert_eq!(process["action"], "process");
    assert_eq!(process["json_block"], "true");
    assert_eq!(process["subtype"], "send");
    assert_eq!(process["block"]["signature"], block.signature.as_str());
    assert_eq!(process["block"]["type"], "state");
}

#[tokio::test]
async fn test_hooks_observe_work() {
    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, 0);

    let log = Arc::new(Mutex::new(Vec::new()));
    helper.add_before_work_hook(Arc::new(Recorder { label: "before-1", log: log.clone() }));
    helper.add_before_work_hook(Arc::new(Recorder { label: "before-2", log: log.clone() }));
    helper.add_after_work_hook(Arc::new(Recorder { label: "after", log: log.clone() }));

    helper.generate_send_block(RECIPIENT, "30").await.unwrap();

    let log = log.lock().unwrap();
    let labels: Vec<_> = log.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, vec!["before-1", "before-2", "after"]);
    assert_eq!(log[0].1.work, None);
    assert_eq!(log[0].1.previous, FRONTIER);
    assert_eq!(log[0].1.balance, "20");
    assert_eq!(log[0].1.link, RECIPIENT);
    assert_eq!(log[2].1.work.as_deref(), Some(WORK));
}

#[tokio::test]
async fn test_hook_mutations_are_signed() {
    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, 0);
    helper.add_before_work_hook(Arc::new(Reroute));

    let block = helper.generate_send_block(RECIPIENT, "30").await.unwrap();
    assert_eq!(block.balance, "25");
    assert_eq!(block.representative, RECIPIENT);
    assert!(verify_block_signature(&block));
}

#[tokio::test]
async fn test_before_hook_failure_skips_work_request() {
    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, 0);
    helper.add_before_work_hook(Arc::new(Failing));

    let err = helper.generate_send_block(RECIPIENT, "30").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Hook);
    assert_eq!(err.to_string(), "work hook failed: blocked by policy");
    assert!(work.requests().is_empty());
}

#[tokio::test]
async fn test_insufficient_work_is_rejected_before_signing() {
    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, u64::MAX);
    let after_calls = Arc::new(AtomicUsize::new(0));
    helper.add_after_work_hook(Arc::new(Counter(after_calls.clone())));

    let err = helper.generate_send_block(RECIPIENT, "30").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WorkGeneration);
    assert!(matches!(
        err,
        NanoError::WorkGeneration {
            source: WorkFailure::BelowThreshold { .. },
            ..
        }
    ));
    assert_eq!(after_calls.load(Ordering::SeqCst), 0);
    assert_eq!(node.actions(), vec!["account_info"]);
}

#[tokio::test]
async fn test_unopened_account_requests_no_work() {
    let node = start_json_node(|_| (200, json!({ "balance": "0", "representative": ACCOUNT }))).await;
    let work = start_work_server(WORK).await;
    let helper = helper_for(&node, &work, 0);

    let err = helper.generate_send_block(RECIPIENT, "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BlockGeneration);
    assert!(err.to_string().contains("no frontier"));
    assert!(work.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_account_state_requests_no_work() {
    for (field, value) in [("frontier", "zz"), ("balance", "12.5")] {
        let node = start_json_node(move |_| {
            let mut info = opened_account_info("50");
            info[field] = json!(value);
            (200, info)
        })
        .await;
        let work = start_work_server(WORK).await;
        let helper = helper_for(&node, &work, 0);

        let err = helper.generate_send_block(RECIPIENT, "1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BlockGeneration, "{field}");
        assert!(err.to_string().contains(field));
        assert!(work.requests().is_empty());
    }
}

#[tokio::test]
async fn test_insufficient_balance() {
    let node = start_ledger_node("1000000000000000000000000000000").await;
    let work = start_work_server(WORK).await;
    let helper = helper_for(&node, &work, 0);

    let err = helper
        .generate_send_block(RECIPIENT, "2000000000000000000000000000000")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    assert!(work.requests().is_empty());
}

#[tokio::test]
async fn test_node_error_is_rpc_connection_error() {
    let node = start_json_node(|_| (200, json!({ "error": "Account not found" }))).await;
    let work = start_work_server(WORK).await;
    let helper = helper_for(&node, &work, 0);

    let err = helper.generate_send_block(RECIPIENT, "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RpcConnection);
    assert_eq!(
        err.source().unwrap().to_string(),
        "endpoint returned error: Account not found"
    );
}

#[tokio::test]
async fn test_work_server_failure_is_work_generation_error() {
    let node = start_ledger_node("50").await;
    let work = start_json_node(|_| (503, json!({ "message": "busy" }))).await;
    let helper = helper_for(&node, &work, 0);

    let err = helper.generate_send_block(RECIPIENT, "30").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WorkGeneration);
    assert!(err.source().unwrap().to_string().starts_with("HTTP 503"));
}

#[tokio::test]
async fn test_custom_work_generator_replaces_endpoint() {
    struct Local(Arc<AtomicUsize>);

    #[async_trait]
    impl WorkGenerator for Local {
        async fn generate(&self, hash: &str) -> Result<String, BoxError> {
            assert_eq!(hash, FRONTIER);
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(WORK.to_string())
        }
    }

    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, 0);
    let calls = Arc::new(AtomicUsize::new(0));
    helper.set_work_generator(Some(Arc::new(Local(calls.clone()))));

    let block = helper.generate_send_block(RECIPIENT, "30").await.unwrap();
    assert_eq!(block.work, WORK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(work.requests().is_empty());

    helper.set_work_generator(None);
    helper.generate_send_block(RECIPIENT, "30").await.unwrap();
    assert_eq!(work.requests().len(), 1);
}

#[tokio::test]
async fn test_custom_work_generator_failure_is_wrapped() {
    struct Broken;

    #[async_trait]
    impl WorkGenerator for Broken {
        async fn generate(&self, _hash: &str) -> Result<String, BoxError> {
            Err("device lost".into())
        }
    }

    let node = start_ledger_node("50").await;
    let work = start_work_server(WORK).await;
    let mut helper = helper_for(&node, &work, 0);
    helper.set_work_generator(Some(Arc::new(Broken)));

    let err = helper.generate_send_block(RECIPIENT, "30").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WorkGeneration);
    assert!(err.to_string().contains("device lost"));
}

#[tokio::test]
async fn test_account_info() {
    let node = start_ledger_node("50").await;
    let helper = NanoHelper::new(HelperConfig::with_rpc_url(node.url.clone())).unwrap();

    let info = helper.account_info(ACCOUNT).await.unwrap();
    assert_eq!(info.frontier.as_deref(), Some(FRONTIER));
    assert_eq!(info.balance.as_deref(), Some("50"));
    assert_eq!(info.block_count.as_deref(), Some("33"));
    assert_eq!(info.account_version.as_deref(), Some("1"));

    let err = helper.account_info("nano_nope").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(node.requests().len(), 1);
}
