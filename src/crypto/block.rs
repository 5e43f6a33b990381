//! State block hashing and signing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};
use ed25519_dalek::hazmat::{raw_sign, raw_verify};
use ed25519_dalek::{Signature, VerifyingKey};

use crate::block::types::{BlockFields, SendBlock};
use crate::crypto::address::{decode_address, derive_address};
use crate::crypto::keys::{decode_hex32, derive_public_key, PublicKey, SecretKey};
use crate::error::{NanoError, NanoResult};

type Blake2b256 = Blake2b<U32>;

/// Preamble of every state block hash: 31 zero bytes then the block type 6.
const STATE_BLOCK_PREAMBLE: [u8; 32] = {
    let mut preamble = [0u8; 32];
    preamble[31] = 6;
    preamble
};

/// Decoded binary form of a state block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateBlockBytes {
    pub account: [u8; 32],
    pub previous: [u8; 32],
    pub representative: [u8; 32],
    pub balance: u128,
    pub link: [u8; 32],
}

/// Blake2b-256 block hash.
pub fn hash_state_block(block: &StateBlockBytes) -> [u8; 32] {
    let digest = Blake2b256::new()
        .chain_update(STATE_BLOCK_PREAMBLE)
        .chain_update(block.account)
        .chain_update(block.previous)
        .chain_update(block.representative)
        .chain_update(block.balance.to_be_bytes())
        .chain_update(block.link)
        .finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Sign `fields` with `secret` and assemble the resulting block.
///
/// The link may be given as an address or as 64 hex characters; the block
/// carries both forms.
pub fn sign_and_assemble_block(secret: &SecretKey, fields: &BlockFields) -> NanoResult<SendBlock> {
    let expanded = secret.expand();
    let verifying_key = VerifyingKey::from(&expanded);
    let account = PublicKey(verifying_key.to_bytes());

    let (link, link_as_account) = match decode_address(&fields.link) {
        Some(key) => (key, fields.link.clone()),
        None => {
            let key = PublicKey::from_hex(&fields.link).ok_or_else(|| {
                NanoError::BlockGeneration(format!("invalid link {:?}", fields.link))
            })?;
            (key, derive_address(&key))
        }
    };

    let bytes = StateBlockBytes {
        account: account.0,
        previous: decode_field("previous", &fields.previous)?,
        representative: decode_address(&fields.representative)
            .ok_or_else(|| {
                NanoError::BlockGeneration(format!(
                    "invalid representative {:?}",
                    fields.representative
                ))
            })?
            .0,
        balance: parse_balance(&fields.balance)?,
        link: link.0,
    };

    let hash = hash_state_block(&bytes);
    let signature = raw_sign::<Blake2b512>(&expanded, &hash, &verifying_key);

    Ok(SendBlock {
        block_type: "state".to_string(),
        account: derive_address(&account),
        previous: fields.previous.to_uppercase(),
        representative: fields.representative.clone(),
        balance: fields.balance.clone(),
        link: link.to_hex(),
        link_as_account: Some(link_as_account),
        work: fields.work.clone(),
        signature: hex::encode_upper(signature.to_bytes()),
    })
}

/// Decode a signed block back into its hashed form.
pub fn block_bytes(block: &SendBlock) -> NanoResult<StateBlockBytes> {
    let invalid = |field: &str| NanoError::BlockGeneration(format!("invalid {field} in block"));
    Ok(StateBlockBytes {
        account: decode_address(&block.account).ok_or_else(|| invalid("account"))?.0,
        previous: decode_field("previous", &block.previous)?,
        representative: decode_address(&block.representative)
            .ok_or_else(|| invalid("representative"))?
            .0,
        balance: parse_balance(&block.balance)?,
        link: decode_field("link", &block.link)?,
    })
}

/// Check the block signature against its own account key.
pub fn verify_block_signature(block: &SendBlock) -> bool {
    let Ok(bytes) = block_bytes(block) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&bytes.account) else {
        return false;
    };
    let mut signature = [0u8; 64];
    if hex::decode_to_slice(&block.signature, &mut signature).is_err() {
        return false;
    }
    let hash = hash_state_block(&bytes);
    raw_verify::<Blake2b512>(&verifying_key, &hash, &Signature::from_bytes(&signature)).is_ok()
}

impl SendBlock {
    /// Block hash as uppercase hex.
    pub fn hash(&self) -> NanoResult<String> {
        Ok(hex::encode_upper(hash_state_block(&block_bytes(self)?)))
    }
}

/// Address of the account controlled by `secret`.
pub fn account_address(secret: &SecretKey) -> String {
    derive_address(&derive_public_key(secret))
}

fn decode_field(name: &str, value: &str) -> NanoResult<[u8; 32]> {
    decode_hex32(value)
        .ok_or_else(|| NanoError::BlockGeneration(format!("{name} must be 64 hex characters")))
}

fn parse_balance(balance: &str) -> NanoResult<u128> {
    if balance.is_empty() || !balance.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NanoError::BlockGeneration(format!(
            "balance {balance:?} is not a raw amount"
        )));
    }
    balance.parse::<u128>().map_err(|_| {
        NanoError::BlockGeneration(format!("balance {balance} exceeds the 128-bit ledger range"))
    })
}
