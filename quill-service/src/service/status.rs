use log::debug;
use quill_core::domain::{resolve_status, DocumentStatus, SignatureRequestState};
use quill_core::foundation::{DocumentUid, Result};
use quill_core::infrastructure::storage::Storage;

/// Derives the document status from live provider state and persists it
/// unconditionally. Concurrent resolutions for the same document are
/// last-write-wins.
pub fn resolve_and_persist(storage: &dyn Storage, uid: &DocumentUid, state: &SignatureRequestState) -> Result<DocumentStatus> {
    let status = resolve_status(state);
    storage.update_document_status(uid, status)?;
    debug!("status resolved document_uid={} status={}", uid, status);
    Ok(status)
}
