//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. The
//! private key is deliberately absent: it is held by the helper's credential
//! state and never serialized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::crypto::SEND_WORK_THRESHOLD;

/// Root configuration for a [`NanoHelper`](crate::helper::NanoHelper).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Node RPC endpoint. Required for any network operation.
    pub rpc_url: Option<String>,

    /// Work generation endpoint. Falls back to `rpc_url` when unset.
    pub work_generation_url: Option<String>,

    /// Deadline for node RPC calls in seconds.
    pub rpc_timeout_secs: u64,

    /// Deadline for `work_generate` calls in seconds.
    pub work_timeout_secs: u64,

    /// Minimum difficulty accepted for generated work.
    pub work_threshold: WorkThreshold,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            work_generation_url: None,
            rpc_timeout_secs: 60,
            work_timeout_secs: 300,
            work_threshold: WorkThreshold::default(),
            log_level: "info".to_string(),
        }
    }
}

impl HelperConfig {
    /// Config pointing both endpoints at `rpc_url`.
    pub fn with_rpc_url(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: Some(rpc_url.into()),
            ..Self::default()
        }
        .with_default_work_url()
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn work_timeout(&self) -> Duration {
        Duration::from_secs(self.work_timeout_secs)
    }

    /// Fill `work_generation_url` from `rpc_url` if it has no value yet.
    /// Empty strings count as unset on both sides.
    pub(crate) fn with_default_work_url(mut self) -> Self {
        if is_unset(&self.work_generation_url) {
            self.work_generation_url = self.rpc_url.clone().filter(|url| !url.is_empty());
        }
        self
    }
}

pub(crate) fn is_unset(url: &Option<String>) -> bool {
    url.as_deref().map_or(true, str::is_empty)
}

/// Work difficulty threshold, written as a 16-digit hex string in config
/// files since it does not fit a TOML integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkThreshold(pub u64);

impl Default for WorkThreshold {
    fn default() -> Self {
        Self(SEND_WORK_THRESHOLD)
    }
}

impl fmt::Display for WorkThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for WorkThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() || digits.len() > 16 {
            return Err(format!("work threshold {s:?} must be 1-16 hex digits"));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| format!("work threshold {s:?} is not hex: {e}"))
    }
}

impl TryFrom<String> for WorkThreshold {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WorkThreshold> for String {
    fn from(value: WorkThreshold) -> Self {
        value.to_string()
    }
}
