//! Block generation subsystem.
//!
//! # Data Flow
//! ```text
//! account info (balance, representative, frontier) + send amount
//!     → balance.rs (new balance, insufficient-balance check)
//!     → builder.rs
//!         → hooks.rs (before-hooks)
//!         → work generator
//!         → hooks.rs (after-hooks)
//!         → crypto signing
//!     → types.rs SendBlock
//! ```

pub mod balance;
pub mod builder;
pub mod hooks;
pub mod types;

pub use balance::balance_after_send;
pub use builder::BlockBuilder;
pub use hooks::{WorkHook, WorkHooks};
pub use types::{BlockFields, SendBlock, WorkContext};
