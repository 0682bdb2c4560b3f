use crate::fixtures::{self, TEST_SIGNER_EMAIL, TEST_SIGNER_NAME};
use quill_core::domain::{SignatureStatus, SignatureTx, TxStatus};
use quill_core::foundation::{now_utc, ContentHash, DocumentUid, SignatureUid, TxHash};
use quill_core::infrastructure::storage::{MemoryStorage, SignedUpdate, Storage};

fn signed_update() -> SignedUpdate {
    SignedUpdate {
        payload: "{}".to_string(),
        ip: "10.0.0.1".to_string(),
        auth_email: TEST_SIGNER_EMAIL.to_string(),
        verifier: Some("verifier-token".to_string()),
        signed_at: now_utc(),
    }
}

#[test]
fn document_round_trip_and_duplicate_rejection() {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document("Doc-1")).expect("insert");

    // Uid lookup is case-normalized.
    let found = storage.get_document(&DocumentUid::from("DOC-1")).expect("get").expect("document");
    assert_eq!(found.title, "Lease Agreement");

    assert!(storage.insert_document(fixtures::document("doc-1")).is_err());
    assert_eq!(storage.list_documents().expect("list").len(), 1);
}

#[test]
fn reverse_lookups_resolve_hash_and_signature() {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document("doc-1")).expect("insert document");
    storage
        .insert_signature(fixtures::pending_signature("sig-1", "doc-1", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME))
        .expect("insert signature");
    storage.insert_hash(&DocumentUid::from("doc-1"), ContentHash::from("ab".repeat(32))).expect("insert hash");

    assert_eq!(
        storage.find_uid_by_hash(&ContentHash::from("AB".repeat(32))).expect("by hash"),
        Some(DocumentUid::from("doc-1"))
    );
    assert_eq!(
        storage.find_uid_by_signature(&SignatureUid::from("sig-1")).expect("by signature"),
        Some(DocumentUid::from("doc-1"))
    );
    assert_eq!(storage.find_uid_by_hash(&ContentHash::from("cd".repeat(32))).expect("miss"), None);
}

#[test]
fn signature_signs_exactly_once() {
    let storage = MemoryStorage::new();
    storage.insert_document(fixtures::document("doc-1")).expect("insert document");
    storage
        .insert_signature(fixtures::pending_signature("sig-1", "doc-1", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME))
        .expect("insert signature");
    let uid = SignatureUid::from("sig-1");

    storage.mark_signature_signed(&uid, signed_update()).expect("first signing");
    let signed = storage.get_signature(&uid).expect("get").expect("signature");
    assert_eq!(signed.status, SignatureStatus::Signed);
    assert_eq!(signed.auth_email.as_deref(), Some(TEST_SIGNER_EMAIL));
    assert!(signed.signed_at.is_some());

    assert!(storage.mark_signature_signed(&uid, signed_update()).is_err());
}

#[test]
fn tx_status_never_regresses_from_terminal() {
    let storage = MemoryStorage::new();
    let tx_hash = TxHash::from("ff".repeat(32));
    storage
        .insert_signature_tx(SignatureTx {
            signature_uid: SignatureUid::from("sig-1"),
            tx_hash: tx_hash.clone(),
            status: TxStatus::Broadcasted,
        })
        .expect("insert tx");

    storage.set_tx_status(&tx_hash, TxStatus::Confirmed).expect("confirm");
    // Idempotent terminal write is fine; switching terminal states is not.
    storage.set_tx_status(&tx_hash, TxStatus::Confirmed).expect("repeat confirm");
    assert!(storage.set_tx_status(&tx_hash, TxStatus::Error).is_err());
    assert!(storage.set_tx_status(&tx_hash, TxStatus::Broadcasted).is_err());

    let tx = storage.get_signature_tx(&SignatureUid::from("sig-1")).expect("get").expect("tx");
    assert_eq!(tx.status, TxStatus::Confirmed);
}

#[test]
fn one_transaction_per_signature() {
    let storage = MemoryStorage::new();
    let tx = SignatureTx {
        signature_uid: SignatureUid::from("sig-1"),
        tx_hash: TxHash::from("aa".repeat(32)),
        status: TxStatus::Broadcasted,
    };
    storage.insert_signature_tx(tx.clone()).expect("insert tx");
    assert!(storage.insert_signature_tx(tx).is_err());
}
