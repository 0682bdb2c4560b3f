use crate::fixtures;
use quill_core::foundation::{ContentHash, DocumentUid};
use quill_core::infrastructure::storage::{MemoryStorage, Storage};
use quill_service::service::hash_ledger::get_and_update_hashes;

fn storage_with_document(uid: &str) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document(uid)).expect("insert document");
    storage
}

#[test]
fn ordered_union_in_first_seen_order() {
    let storage = storage_with_document("doc-1");
    let uid = DocumentUid::from("doc-1");
    let a = ContentHash::from("a".repeat(64));
    let b = ContentHash::from("b".repeat(64));
    let c = ContentHash::from("c".repeat(64));

    let first = get_and_update_hashes(&storage, &uid, &[a.clone(), b.clone()]).expect("first update");
    assert_eq!(first, vec![a.clone(), b.clone()]);

    // Repeats from the first batch must not duplicate; the new hash lands last.
    let second = get_and_update_hashes(&storage, &uid, &[b.clone(), c.clone(), a.clone()]).expect("second update");
    assert_eq!(second, vec![a.clone(), b.clone(), c.clone()]);
    assert_eq!(storage.list_hashes(&uid).expect("list"), vec![a, b, c]);
}

#[test]
fn empty_input_is_a_pure_read() {
    let storage = storage_with_document("doc-1");
    let uid = DocumentUid::from("doc-1");
    let a = ContentHash::from("a".repeat(64));
    get_and_update_hashes(&storage, &uid, &[a.clone()]).expect("seed");

    for _ in 0..3 {
        let hashes = get_and_update_hashes(&storage, &uid, &[]).expect("read");
        assert_eq!(hashes, vec![a.clone()]);
    }
    assert_eq!(storage.list_hashes(&uid).expect("list").len(), 1);
}

#[test]
fn dedup_is_case_insensitive() {
    let storage = storage_with_document("doc-1");
    let uid = DocumentUid::from("doc-1");

    get_and_update_hashes(&storage, &uid, &[ContentHash::from("DEADBEEF")]).expect("seed");
    let hashes = get_and_update_hashes(&storage, &uid, &[ContentHash::from("deadbeef")]).expect("update");
    assert_eq!(hashes, vec![ContentHash::from("deadbeef")]);
}

#[test]
fn unknown_document_fails_on_append_but_reads_empty() {
    let storage = MemoryStorage::new();
    let uid = DocumentUid::from("missing");

    assert_eq!(get_and_update_hashes(&storage, &uid, &[]).expect("pure read"), Vec::new());
    assert!(get_and_update_hashes(&storage, &uid, &[ContentHash::from("ab")]).is_err());
}
