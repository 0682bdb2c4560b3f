use std::time::Duration;

/// Fixed backoff between deploy confirmation polls.
pub const CONFIRM_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Hex length of the SHA-256 content digest.
pub const CONTENT_HASH_HEX_LEN: usize = 64;

/// Contract entry point receiving signature proofs.
pub const STORE_SIGNATURE_ENTRY_POINT: &str = "store_signature";

/// Named contract holding signature proofs.
pub const SIGNATURE_CONTRACT_NAME: &str = "quillsign_contract";
