//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HelperConfig (validated)
//!     → owned by one NanoHelper
//!
//! Runtime setters (set_rpc_url, set_work_generation_url, set_private_key)
//!     → validation.rs (same field checks)
//!     → NanoHelper state
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The private key never lives in HelperConfig

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{HelperConfig, WorkThreshold};
