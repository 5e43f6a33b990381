//! Account address encoding.
//!
//! An address is `nano_` (or the legacy `xrb_`) followed by 52 base-32
//! characters for the public key (padded with 4 leading zero bits) and 8
//! characters of checksum: the Blake2b-40 digest of the key, byte-reversed.

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};

use crate::crypto::keys::PublicKey;

/// Current address prefix.
pub const ADDRESS_PREFIX: &str = "nano_";

/// Prefix used by older wallets and libraries.
pub const LEGACY_ADDRESS_PREFIX: &str = "xrb_";

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";
const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;

type Blake2b40 = Blake2b<U5>;

/// Encode a public key as a `nano_` address.
pub fn derive_address(public_key: &PublicKey) -> String {
    let mut out = String::with_capacity(ADDRESS_PREFIX.len() + KEY_CHARS + CHECKSUM_CHARS);
    out.push_str(ADDRESS_PREFIX);

    // 4 zero bits + 256 key bits = 260 bits = 52 characters.
    let mut padded = [0u8; 33];
    padded[1..].copy_from_slice(public_key.as_bytes());
    encode_bits(&padded, 4, KEY_CHARS, &mut out);

    let checksum = checksum(public_key);
    encode_bits(&checksum, 0, CHECKSUM_CHARS, &mut out);
    out
}

/// Decode an address (either prefix) back into its public key.
///
/// Returns `None` for a wrong prefix, length, alphabet or checksum.
pub fn decode_address(address: &str) -> Option<PublicKey> {
    let body = address
        .strip_prefix(ADDRESS_PREFIX)
        .or_else(|| address.strip_prefix(LEGACY_ADDRESS_PREFIX))?;
    if body.len() != KEY_CHARS + CHECKSUM_CHARS {
        return None;
    }
    let (key_part, checksum_part) = body.split_at(KEY_CHARS);
    // The first character only carries the final key bit after the padding.
    if !matches!(key_part.as_bytes()[0], b'1' | b'3') {
        return None;
    }

    let padded = decode_bits::<33>(key_part, 4)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&padded[1..]);
    let public_key = PublicKey(key);

    let expected = decode_bits::<5>(checksum_part, 0)?;
    (expected == checksum(&public_key)).then_some(public_key)
}

/// Rewrite a legacy `xrb_` address to the `nano_` prefix.
///
/// Purely cosmetic: both prefixes name the same key. Anything else is returned
/// unchanged.
pub fn normalize_account_prefix(address: &str) -> String {
    match address.strip_prefix(LEGACY_ADDRESS_PREFIX) {
        Some(rest) => format!("{ADDRESS_PREFIX}{rest}"),
        None => address.to_string(),
    }
}

fn checksum(public_key: &PublicKey) -> [u8; 5] {
    let digest = Blake2b40::digest(public_key.as_bytes());
    let mut out = [0u8; 5];
    out.copy_from_slice(&digest);
    out.reverse();
    out
}

/// Append `chars` base-32 characters for `bytes`, skipping `skip_bits` leading bits.
fn encode_bits(bytes: &[u8], skip_bits: usize, chars: usize, out: &mut String) {
    for i in 0..chars {
        let mut value = 0usize;
        for b in 0..5 {
            let bit = skip_bits + i * 5 + b;
            let set = (bytes[bit / 8] >> (7 - bit % 8)) & 1;
            value = (value << 1) | set as usize;
        }
        out.push(ALPHABET[value] as char);
    }
}

/// Inverse of [`encode_bits`], writing into an `N`-byte buffer whose first
/// `skip_bits` bits stay zero.
fn decode_bits<const N: usize>(encoded: &str, skip_bits: usize) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    for (i, c) in encoded.bytes().enumerate() {
        let value = ALPHABET.iter().position(|&a| a == c)?;
        for b in 0..5 {
            if (value >> (4 - b)) & 1 == 1 {
                let bit = skip_bits + i * 5 + b;
                out[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
    }
    Some(out)
}
