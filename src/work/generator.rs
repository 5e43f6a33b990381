//! Work acquisition and validation.
//!
//! # Responsibilities
//! - Obtain work for a root hash from a caller-supplied generator, or from
//!   the work generation endpoint via `work_generate`
//! - Reject any result that does not meet the difficulty threshold, no
//!   matter where it came from

use async_trait::async_trait;

use crate::crypto::work::{parse_work, verify_work, work_difficulty};
use crate::crypto::keys::decode_hex32;
use crate::error::{BoxError, NanoError, NanoResult, WorkFailure};
use crate::observability::metrics;
use crate::rpc::RpcClient;

/// A local source of proof-of-work.
#[async_trait]
pub trait WorkGenerator: Send + Sync {
    /// Compute a work token for the 64-hex-character `hash`.
    async fn generate(&self, hash: &str) -> Result<String, BoxError>;
}

/// Where work should come from for one request.
pub enum WorkSource<'a> {
    /// `work_generate` against this URL.
    Remote { rpc: &'a RpcClient, url: &'a str },
    /// A caller-supplied generator.
    Local(&'a dyn WorkGenerator),
}

impl WorkSource<'_> {
    fn label(&self) -> &'static str {
        match self {
            WorkSource::Remote { .. } => "remote",
            WorkSource::Local(_) => "local",
        }
    }
}

/// Obtain work for `hash` and validate it against `threshold`.
///
/// Generator failures are wrapped as work generation errors carrying the
/// original message. Work below the threshold is rejected even when the
/// generator reported success.
pub async fn generate_work(source: WorkSource<'_>, hash: &str, threshold: u64) -> NanoResult<String> {
    let label = source.label();
    tracing::debug!(source = label, hash = %hash, threshold = %format!("{threshold:016x}"), "Requesting work");

    let result = obtain(&source, hash)
        .await
        .and_then(|work| validate(hash, work, threshold));
    metrics::record_work_generation(label, result.is_ok());

    if let Err(e) = &result {
        tracing::warn!(source = label, hash = %hash, error = %e, "Work generation failed");
    }
    result
}

async fn obtain(source: &WorkSource<'_>, hash: &str) -> NanoResult<String> {
    match source {
        WorkSource::Remote { rpc, url } => rpc.work_generate(url, hash).await,
        WorkSource::Local(generator) => generator.generate(hash).await.map_err(|e| {
            NanoError::work(
                format!("custom work generator failed: {e}"),
                WorkFailure::Generator(e),
            )
        }),
    }
}

fn validate(hash: &str, work: String, threshold: u64) -> NanoResult<String> {
    if work.is_empty() {
        return Err(NanoError::work("work source returned no work", WorkFailure::Missing));
    }
    let Some(nonce) = parse_work(&work) else {
        return Err(NanoError::work(
            format!("work {work:?} is not a valid work token"),
            WorkFailure::Malformed(work),
        ));
    };
    if verify_work(hash, &work, threshold) {
        return Ok(work);
    }
    let difficulty = decode_hex32(hash)
        .map(|root| work_difficulty(&root, nonce))
        .unwrap_or_default();
    Err(NanoError::work(
        format!("work {work} does not meet the required difficulty"),
        WorkFailure::BelowThreshold {
            work,
            difficulty,
            threshold,
        },
    ))
}
