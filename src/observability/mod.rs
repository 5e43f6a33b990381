//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc, work, block, helper
//!     → tracing events (request/response, generated blocks, failures)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr) in the CLI
//!     → any metrics recorder the embedding application installs
//! ```

pub mod logging;
pub mod metrics;
