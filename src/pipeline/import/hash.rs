use std::path::Path;

use base64::Engine;
use sha2::{Digest, Sha256};

use super::ImportError;

/// Compute SHA-256 content hash of the source file, base64-encoded.
pub fn compute_content_hash(path: &Path) -> Result<String, ImportError> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

pub fn hash_bytes(content: &[u8]) -> String {
    let hash = Sha256::digest(content);
    base64::engine::general_purpose::STANDARD.encode(hash)
}
