//! Error taxonomy shared by every subsystem.
//!
//! Each failure surfaces exactly once to the immediate caller, tagged with a
//! stable [`ErrorKind`]. Low-level causes (transport errors, HTTP bodies,
//! generator failures) stay reachable through `Error::source()`.

use std::time::Duration;
use thiserror::Error;

/// Boxed error returned by caller-supplied work generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable classification of a [`NanoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    BlockGeneration,
    RpcConnection,
    WorkGeneration,
    InsufficientBalance,
    Hook,
}

/// Errors that can occur while building or submitting blocks.
#[derive(Debug, Error)]
pub enum NanoError {
    /// Missing or malformed URL, private key, address or amount.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The block could not be assembled (unopened account, no work, bad fields).
    #[error("block generation error: {0}")]
    BlockGeneration(String),

    /// A call to the node RPC endpoint failed.
    #[error("RPC connection error: {message}")]
    RpcConnection {
        message: String,
        #[source]
        source: RpcFailure,
    },

    /// Work could not be obtained or did not meet the difficulty threshold.
    #[error("work generation error: {message}")]
    WorkGeneration {
        message: String,
        #[source]
        source: WorkFailure,
    },

    /// The send would leave the account with a negative balance.
    #[error("insufficient balance: cannot send {amount} raw from a balance of {balance} raw")]
    InsufficientBalance { balance: String, amount: String },

    /// Raised by a caller-registered work hook.
    #[error("work hook failed: {0}")]
    Hook(String),
}

impl NanoError {
    /// Stable kind tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NanoError::Configuration(_) => ErrorKind::Configuration,
            NanoError::BlockGeneration(_) => ErrorKind::BlockGeneration,
            NanoError::RpcConnection { .. } => ErrorKind::RpcConnection,
            NanoError::WorkGeneration { .. } => ErrorKind::WorkGeneration,
            NanoError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            NanoError::Hook(_) => ErrorKind::Hook,
        }
    }

    pub(crate) fn work(message: impl Into<String>, source: WorkFailure) -> Self {
        NanoError::WorkGeneration {
            message: message.into(),
            source,
        }
    }
}

/// Low-level cause of a failed RPC exchange.
#[derive(Debug, Error)]
pub enum RpcFailure {
    /// No response arrived before the deadline; the request was dropped.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body transfer failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status. The body is kept for diagnostics.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint answered with an `error` field.
    #[error("endpoint returned error: {0}")]
    Node(String),

    /// The response was not the JSON shape expected for the action.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Low-level cause of a failed work generation.
#[derive(Debug, Error)]
pub enum WorkFailure {
    #[error(transparent)]
    Rpc(#[from] RpcFailure),

    /// A caller-supplied generator returned an error.
    #[error("{0}")]
    Generator(BoxError),

    #[error("work {work} has difficulty {difficulty:016x}, below threshold {threshold:016x}")]
    BelowThreshold {
        work: String,
        difficulty: u64,
        threshold: u64,
    },

    #[error("work value {0:?} is not a 16-digit hex token")]
    Malformed(String),

    #[error("no work value was produced")]
    Missing,
}

/// Result type for all fallible operations in this crate.
pub type NanoResult<T> = Result<T, NanoError>;
