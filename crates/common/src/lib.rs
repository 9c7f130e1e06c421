//! Markex Common Utilities
//!
//! Shared infrastructure for all Markex crates:
//! - Error types and result aliases
//! - Progress counting for work observed from another thread
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod progress;

pub use config::*;
pub use error::*;
pub use progress::*;
