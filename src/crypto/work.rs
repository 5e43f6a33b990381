//! Proof-of-work difficulty.
//!
//! Difficulty is the little-endian `u64` of Blake2b-64(work ‖ root), where
//! `work` is the 8-byte little-endian nonce and `root` the 32-byte hash the
//! work was computed for. Work is valid when difficulty >= threshold.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};

use crate::crypto::keys::decode_hex32;

/// Base difficulty for send and change blocks.
pub const SEND_WORK_THRESHOLD: u64 = 0xffff_fff8_0000_0000;

/// Base difficulty for receive and open blocks.
pub const RECEIVE_WORK_THRESHOLD: u64 = 0xffff_fe00_0000_0000;

type Blake2b64 = Blake2b<U8>;

/// Compute the difficulty of `work` over a 32-byte `root`.
pub fn work_difficulty(root: &[u8; 32], work: u64) -> u64 {
    let digest = Blake2b64::new()
        .chain_update(work.to_le_bytes())
        .chain_update(root)
        .finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest);
    u64::from_le_bytes(bytes)
}

/// Parse a work token: exactly 16 hex digits, most significant first.
pub fn parse_work(work: &str) -> Option<u64> {
    if work.len() != 16 || !work.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(work, 16).ok()
}

/// Format a nonce as a work token.
pub fn format_work(work: u64) -> String {
    format!("{work:016x}")
}

/// Check `work` against `threshold` for the hex `root` hash.
///
/// Malformed roots or tokens are simply invalid.
pub fn verify_work(root: &str, work: &str, threshold: u64) -> bool {
    match (decode_hex32(root), parse_work(work)) {
        (Some(root), Some(work)) => work_difficulty(&root, work) >= threshold,
        _ => false,
    }
}
