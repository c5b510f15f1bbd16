//! Artifact digests.

use crate::error::{Result, SbomError};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

/// SHA-1 of a file's contents as lower-case hex
pub fn sha1_file(path: &Path) -> Result<String> {
    digest_file::<Sha1>(path)
}

/// SHA-256 of a file's contents as lower-case hex
pub fn sha256_file(path: &Path) -> Result<String> {
    digest_file::<Sha256>(path)
}

fn digest_file<D: Digest + std::io::Write>(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| SbomError::io(path, e))?;
    let mut hasher = D::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| SbomError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_known_digests() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"hello world").expect("write");

        assert_eq!(
            sha1_file(file.path()).expect("sha1"),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(
            sha256_file(file.path()).expect("sha256"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = sha256_file(Path::new("/nonexistent/image.swu")).unwrap_err();
        assert!(matches!(err, SbomError::Io { .. }));
    }
}
