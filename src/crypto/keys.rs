//! Account keys.
//!
//! Nano accounts use Ed25519 with Blake2b-512 in place of SHA-512, both for
//! expanding the 32-byte private key and for the signing nonce.

use blake2::{Blake2b512, Digest};
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;
use std::fmt;

use crate::error::{NanoError, NanoResult};

/// A 32-byte account private key.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex private key.
    pub fn from_hex(s: &str) -> NanoResult<Self> {
        decode_hex32(s)
            .map(Self)
            .ok_or_else(|| NanoError::Configuration("private key must be 64 hex characters".into()))
    }

    pub(crate) fn expand(&self) -> ExpandedSecretKey {
        let digest = Blake2b512::digest(self.0);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&digest);
        ExpandedSecretKey::from_bytes(&bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A 32-byte account public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase hex, the form the node RPC uses.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Parse a 64-character hex public key.
    pub fn from_hex(s: &str) -> Option<Self> {
        decode_hex32(s).map(Self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

/// Derive the public key for a private key.
pub fn derive_public_key(secret: &SecretKey) -> PublicKey {
    let verifying_key = VerifyingKey::from(&secret.expand());
    PublicKey(verifying_key.to_bytes())
}

/// Decode exactly 32 bytes of hex (either case).
pub(crate) fn decode_hex32(s: &str) -> Option<[u8; 32]> {
    if s.len() != 64 {
        return None;
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(s, &mut out).ok()?;
    Some(out)
}
