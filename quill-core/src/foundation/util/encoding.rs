use sha2::{Digest, Sha256};

/// SHA-256 over raw bytes, lowercase hex.
///
/// This digest identifies document content across deployments and must stay
/// stable: existing documents carry histories of exactly these values.
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}
