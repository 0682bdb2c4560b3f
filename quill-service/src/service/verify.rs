use log::debug;
use quill_core::domain::hashes::proof_key;
use quill_core::domain::{Signature, SignatureInfoSigned};
use quill_core::foundation::{DocumentUid, QuillError, Result};
use quill_core::infrastructure::ledger::LedgerClient;

/// Re-reads the on-chain proof for a signature and checks it against the
/// payload persisted at signing time. The on-chain copy is addressed by the
/// key derived from `(document_uid, recipient_email)`.
pub async fn validate(ledger: &dyn LedgerClient, document_uid: &DocumentUid, signature: &Signature) -> Result<()> {
    let stored = signature
        .payload
        .as_deref()
        .ok_or_else(|| QuillError::ValidationFailure(format!("signature {} has no stored proof payload", signature.uid)))?;
    let local: SignatureInfoSigned = serde_json::from_str(stored)?;

    let key = proof_key(document_uid.as_str(), &signature.recipient_email);
    let raw = ledger.read_state(&key).await?;
    let on_chain: SignatureInfoSigned = serde_json::from_str(&raw)?;

    if on_chain != local {
        return Err(QuillError::VerificationMismatch {
            document_uid: document_uid.to_string(),
            email: signature.recipient_email.clone(),
        });
    }

    debug!("signature proof verified document_uid={} signature_uid={}", document_uid, signature.uid);
    Ok(())
}
