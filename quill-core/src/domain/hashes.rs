use crate::foundation::util::sha256_hex;
use crate::foundation::ContentHash;

/// Digest of a document file's raw bytes.
pub fn content_hash(bytes: &[u8]) -> ContentHash {
    ContentHash::new(sha256_hex(bytes))
}

/// On-chain addressing key for a signature proof.
///
/// Must match the key used at broadcast time, or stored proofs become
/// unreadable: `sha256("{document_uid}:{recipient_email}")`.
pub fn proof_key(document_uid: &str, email: &str) -> String {
    sha256_hex(format!("{document_uid}:{email}").as_bytes())
}

/// Privacy-preserving commitment to an email or IP inside the proof payload.
pub fn identity_hash(value: &str) -> String {
    sha256_hex(value.as_bytes())
}
