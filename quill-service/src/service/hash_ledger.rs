use log::debug;
use quill_core::foundation::{ContentHash, DocumentUid, Result};
use quill_core::infrastructure::storage::Storage;

/// Merges incoming content hashes into a document's append-only hash history
/// and returns the full ordered set: existing hashes in first-seen order,
/// then previously unseen incoming hashes in input order.
///
/// `ContentHash` is lowercase-normalized at construction, so equality here
/// is case-insensitive. An empty `incoming` slice is a pure read.
///
/// The existence check and the insert are separate storage calls; two
/// concurrent updates for the same document can both pass the check and
/// insert the same hash twice.
pub fn get_and_update_hashes(storage: &dyn Storage, uid: &DocumentUid, incoming: &[ContentHash]) -> Result<Vec<ContentHash>> {
    let mut hashes = storage.list_hashes(uid)?;

    for hash in incoming {
        if hashes.contains(hash) {
            continue;
        }
        storage.insert_hash(uid, hash.clone())?;
        debug!("hash ledger append document_uid={} hash={}", uid, hash);
        hashes.push(hash.clone());
    }

    Ok(hashes)
}
