//! Block records passed between the builder, the signer and the node.

use serde::{Deserialize, Serialize};

/// A fully signed state block that reduces the sender's balance.
///
/// Immutable once produced; `work` and `signature` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBlock {
    /// Always `"state"`.
    #[serde(rename = "type")]
    pub block_type: String,
    pub account: String,
    pub previous: String,
    pub representative: String,
    /// Balance after the send, in raw.
    pub balance: String,
    /// Recipient public key as uppercase hex.
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_as_account: Option<String>,
    pub work: String,
    pub signature: String,
}

/// Unsigned inputs to a state block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFields {
    pub previous: String,
    pub representative: String,
    pub balance: String,
    /// Recipient address, or a 64-hex link.
    pub link: String,
    pub work: String,
}

/// Mutable record shared by work hooks and the block builder.
///
/// `work` is `None` for before-hooks and set for after-hooks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkContext {
    pub representative: String,
    pub balance: String,
    pub link: String,
    pub previous: String,
    pub work: Option<String>,
}
