use std::fs;
use std::path::Path;

use crate::domain::error::EngineResult;
use crate::domain::types::{Certificate, PublicKey};

/// Load every well-formed DER certificate from `dir`.
///
/// Files that do not parse as a single DER certificate (PEM encodings, key
/// files, garbage) are silently excluded, not reported: bundle directories
/// routinely mix certificates with other material, and callers assert on the
/// count of certificates they actually shipped. Failing to read the directory
/// itself is still an error.
pub fn certificates_in_directory(dir: impl AsRef<Path>) -> EngineResult<Vec<Certificate>> {
    let mut certificates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Ok(bytes) = fs::read(&path) else {
            continue;
        };
        if let Ok(certificate) = Certificate::from_der(bytes) {
            certificates.push(certificate);
        }
    }
    Ok(certificates)
}

/// Public keys of every certificate in `dir`, for key-pinning setup.
pub fn public_keys_in_directory(dir: impl AsRef<Path>) -> EngineResult<Vec<PublicKey>> {
    Ok(certificates_in_directory(dir)?
        .iter()
        .map(Certificate::public_key)
        .collect())
}
