//! Proof-of-work subsystem.
//!
//! # Data Flow
//! ```text
//! block builder (root = previous)
//!     → generator.rs
//!         → caller's WorkGenerator (if registered), or
//!         → rpc client `work_generate` against the work URL
//!     → crypto::work difficulty check against the threshold
//!     → accepted work token, or WorkGeneration error
//! ```
//!
//! # Design Decisions
//! - Every result is checked locally against the threshold, including
//!   work server responses
//! - Local generators are trait objects, swapped at runtime by the helper

pub mod cpu;
pub mod generator;

pub use cpu::CpuWorkGenerator;
pub use generator::{generate_work, WorkGenerator, WorkSource};
