//! Nano send-block generation library.
//!
//! Fetches account state from a node, computes the new balance, obtains and
//! validates proof-of-work, signs a state send block and submits it.

pub mod block;
pub mod config;
pub mod crypto;
pub mod error;
pub mod helper;
pub mod observability;
pub mod rpc;
pub mod work;

pub use block::{SendBlock, WorkContext, WorkHook};
pub use config::HelperConfig;
pub use error::{ErrorKind, NanoError, NanoResult};
pub use helper::NanoHelper;
pub use work::WorkGenerator;
