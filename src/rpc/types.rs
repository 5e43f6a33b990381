//! Node RPC request and response shapes.

use serde::{Deserialize, Serialize};

use crate::block::types::SendBlock;

/// Which class of endpoint a call targets. Decides how failures are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Ledger node RPC (`account_info`, `process`, ...).
    Node,
    /// Work generation server (`work_generate`).
    WorkServer,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Node => "node",
            Endpoint::WorkServer => "work",
        }
    }
}

/// `account_info` request parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfoRequest<'a> {
    pub account: &'a str,
    pub representative: &'static str,
}

impl<'a> AccountInfoRequest<'a> {
    pub fn new(account: &'a str) -> Self {
        Self {
            account,
            representative: "true",
        }
    }
}

/// `account_info` response.
///
/// Unopened accounts have no `frontier`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub frontier: Option<String>,
    pub open_block: Option<String>,
    pub representative_block: Option<String>,
    pub representative: Option<String>,
    pub balance: Option<String>,
    pub modified_timestamp: Option<String>,
    pub block_count: Option<String>,
    pub confirmation_height: Option<String>,
    pub confirmation_height_frontier: Option<String>,
    pub account_version: Option<String>,
}

/// `process` request parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequest<'a> {
    pub json_block: &'static str,
    pub subtype: &'static str,
    pub block: &'a SendBlock,
}

impl<'a> ProcessRequest<'a> {
    pub fn send(block: &'a SendBlock) -> Self {
        Self {
            json_block: "true",
            subtype: "send",
            block,
        }
    }
}

/// `process` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessResponse {
    pub hash: String,
}

/// `work_generate` request parameters.
#[derive(Debug, Clone, Serialize)]
pub struct WorkGenerateRequest<'a> {
    pub hash: &'a str,
}

/// `work_generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkGenerateResponse {
    pub work: String,
}
