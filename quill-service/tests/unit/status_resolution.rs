use crate::fixtures::{self, TEST_REQUESTER_EMAIL, TEST_SIGNER_EMAIL, TEST_SIGNER_NAME};
use quill_core::domain::{DocumentStatus, PROVIDER_STATUS_SIGNED};
use quill_core::foundation::DocumentUid;
use quill_core::infrastructure::storage::{MemoryStorage, Storage};
use quill_service::service::status::resolve_and_persist;

#[test]
fn resolved_status_is_persisted() {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document("doc-1")).expect("insert document");
    let uid = DocumentUid::from("doc-1");

    let mut state = fixtures::request_state(
        "doc-1",
        vec![
            fixtures::provider_signature("sig-owner", TEST_REQUESTER_EMAIL, "Owner"),
            fixtures::provider_signature("sig-alice", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME),
        ],
    );

    // Nobody signed: the request is simply out.
    let status = resolve_and_persist(&storage, &uid, &state).expect("resolve");
    assert_eq!(status, DocumentStatus::OutForSignature);
    assert_eq!(storage.get_document(&uid).expect("get").map(|doc| doc.status), Some(DocumentStatus::OutForSignature));

    // Another signer done, requester pending: awaiting my signature.
    state.signatures[1].status_code = PROVIDER_STATUS_SIGNED.to_string();
    let status = resolve_and_persist(&storage, &uid, &state).expect("resolve");
    assert_eq!(status, DocumentStatus::AwaitingMySignature);

    // Completion dominates everything else.
    state.is_complete = true;
    state.is_declined = true;
    let status = resolve_and_persist(&storage, &uid, &state).expect("resolve");
    assert_eq!(status, DocumentStatus::Completed);
    assert_eq!(storage.get_document(&uid).expect("get").map(|doc| doc.status), Some(DocumentStatus::Completed));
}

#[test]
fn declined_beats_signature_progress() {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document("doc-1")).expect("insert document");
    let uid = DocumentUid::from("doc-1");

    let mut state = fixtures::request_state(
        "doc-1",
        vec![fixtures::provider_signature("sig-alice", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME)],
    );
    state.is_declined = true;
    state.signatures[0].status_code = PROVIDER_STATUS_SIGNED.to_string();

    assert_eq!(resolve_and_persist(&storage, &uid, &state).expect("resolve"), DocumentStatus::Declined);
}
