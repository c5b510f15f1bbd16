//! Shared utilities.

mod hash;

pub use hash::{sha1_file, sha256_file};
