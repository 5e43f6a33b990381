//! Node RPC subsystem.
//!
//! # Data Flow
//! ```text
//! helper / work generator
//!     → client.rs (body construction, deadline, POST)
//!     → node or work server
//!     → client.rs (status, JSON `error` field, decode)
//!     → types.rs response, or a classified NanoError
//! ```
//!
//! # Design Decisions
//! - Node failures become `RpcConnection`, work server failures become
//!   `WorkGeneration`; the transport cause stays attached as `source()`
//! - No connection reuse guarantees, no retries, no background tasks

pub mod client;
pub mod types;

pub use client::{RpcClient, DEFAULT_RPC_TIMEOUT, DEFAULT_WORK_TIMEOUT};
pub use types::{AccountInfo, Endpoint};
