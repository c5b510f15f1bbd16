//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs.

mod assemble;

pub use assemble::{run_assemble, run_assemble_with};

// Re-export config types used by handlers
pub use crate::config::{AssembleConfig, ScannerConfig};
