//! Nano cryptographic primitives.
//!
//! # Data Flow
//! ```text
//! private key (hex)
//!     → keys.rs (Blake2b-512 expansion, Ed25519 public key)
//!     → address.rs (nano_ base-32 address + checksum)
//!     → block.rs (state block hash, signature, assembled SendBlock)
//!
//! work token + root hash
//!     → work.rs (Blake2b-64 difficulty, threshold check)
//! ```
//!
//! # Security Constraints
//! - `SecretKey` never prints its bytes
//! - Nothing in this module logs

pub mod address;
pub mod block;
pub mod keys;
pub mod work;

pub use address::{decode_address, derive_address, normalize_account_prefix};
pub use block::{account_address, sign_and_assemble_block, verify_block_signature};
pub use keys::{derive_public_key, PublicKey, SecretKey};
pub use work::{verify_work, RECEIVE_WORK_THRESHOLD, SEND_WORK_THRESHOLD};
