//! Assembly pipeline.
//!
//! [`assemble`] folds the manifest and every source into the output
//! documents; [`output_path`] and [`write_output`] put them on disk.

mod assemble;
mod output;

pub use assemble::{assemble, Assembler, AssemblyOutput, MergeStats};
pub use output::{output_path, write_output, OUTPUT_SUFFIX};

/// Process exit codes
pub mod exit_codes {
    /// The SBOM was written
    pub const SUCCESS: i32 = 0;
    /// A fatal error stopped the run
    pub const ERROR: i32 = 1;
}
