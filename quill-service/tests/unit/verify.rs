use crate::fixtures::{self, TEST_SIGNER_EMAIL, TEST_SIGNER_NAME};
use quill_core::domain::hashes::proof_key;
use quill_core::foundation::{DocumentUid, ErrorCode};
use quill_core::infrastructure::ledger::MockLedger;
use quill_service::service::verify::validate;

#[tokio::test]
async fn matching_proof_validates() {
    let ledger = MockLedger::new();
    let uid = DocumentUid::from("doc-1");
    let payload = serde_json::to_string(&fixtures::signed_payload()).expect("payload");

    let mut signature = fixtures::pending_signature("sig-1", "doc-1", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME);
    signature.payload = Some(payload.clone());
    ledger.overwrite_state(&proof_key("doc-1", TEST_SIGNER_EMAIL), payload).expect("seed state");

    validate(&ledger, &uid, &signature).await.expect("validate");
}

#[tokio::test]
async fn tampered_proof_fails_naming_document_and_email() {
    let ledger = MockLedger::new();
    let uid = DocumentUid::from("doc-1");

    let mut signature = fixtures::pending_signature("sig-1", "doc-1", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME);
    signature.payload = Some(serde_json::to_string(&fixtures::signed_payload()).expect("payload"));

    let mut tampered = fixtures::signed_payload();
    tampered.info.timestamp += 1;
    ledger
        .overwrite_state(&proof_key("doc-1", TEST_SIGNER_EMAIL), serde_json::to_string(&tampered).expect("payload"))
        .expect("seed state");

    let err = validate(&ledger, &uid, &signature).await.expect_err("mismatch");
    assert_eq!(err.code(), ErrorCode::VerificationMismatch);
    assert!(err.to_string().contains("doc-1"));
    assert!(err.to_string().contains(TEST_SIGNER_EMAIL));
}

#[tokio::test]
async fn unsigned_signature_cannot_be_validated() {
    let ledger = MockLedger::new();
    let uid = DocumentUid::from("doc-1");
    let signature = fixtures::pending_signature("sig-1", "doc-1", TEST_SIGNER_EMAIL, TEST_SIGNER_NAME);

    let err = validate(&ledger, &uid, &signature).await.expect_err("no payload");
    assert_eq!(err.code(), ErrorCode::ValidationFailure);
}
