//! CPU proof-of-work search.
//!
//! Slow at the live send threshold (hundreds of millions of hashes on
//! average); intended for testing and for callers without a work server.

use async_trait::async_trait;
use rand::Rng;

use crate::crypto::keys::decode_hex32;
use crate::crypto::work::{format_work, work_difficulty};
use crate::error::BoxError;
use crate::work::generator::WorkGenerator;

/// Brute-force nonce search on a blocking thread.
#[derive(Debug, Clone, Copy)]
pub struct CpuWorkGenerator {
    threshold: u64,
}

impl CpuWorkGenerator {
    /// Search until a nonce reaches `threshold`.
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    /// Search synchronously, starting from `start`.
    pub fn search(root: &[u8; 32], threshold: u64, start: u64) -> u64 {
        let mut nonce = start;
        while work_difficulty(root, nonce) < threshold {
            nonce = nonce.wrapping_add(1);
        }
        nonce
    }
}

#[async_trait]
impl WorkGenerator for CpuWorkGenerator {
    async fn generate(&self, hash: &str) -> Result<String, BoxError> {
        let root = decode_hex32(hash).ok_or("work root must be 64 hex characters")?;
        let threshold = self.threshold;
        let start = rand::thread_rng().gen::<u64>();

        let nonce =
            tokio::task::spawn_blocking(move || Self::search(&root, threshold, start)).await?;
        Ok(format_work(nonce))
    }
}
