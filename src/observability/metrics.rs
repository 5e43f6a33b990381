//! Metrics collection.
//!
//! # Metrics
//! - `nano_rpc_requests_total` (counter): RPC calls by action, endpoint, outcome
//! - `nano_rpc_request_duration_seconds` (histogram): RPC latency by action
//! - `nano_work_generations_total` (counter): work attempts by source, outcome
//! - `nano_blocks_generated_total` (counter): signed send blocks produced
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Binaries choose the exporter

use std::time::Duration;

/// Record one finished RPC exchange.
pub fn record_rpc_call(action: &str, endpoint: &'static str, ok: bool, elapsed: Duration) {
    let outcome = if ok { "success" } else { "failure" };
    metrics::counter!(
        "nano_rpc_requests_total",
        "action" => action.to_string(),
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("nano_rpc_request_duration_seconds", "action" => action.to_string())
        .record(elapsed.as_secs_f64());
}

/// Record one work generation attempt (`source` is "remote" or "local").
pub fn record_work_generation(source: &'static str, ok: bool) {
    let outcome = if ok { "success" } else { "failure" };
    metrics::counter!(
        "nano_work_generations_total",
        "source" => source,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a signed send block.
pub fn record_block_generated() {
    metrics::counter!("nano_blocks_generated_total").increment(1);
}
