use crate::fixtures::{self, wait_for_tx_terminal, TEST_CHAIN_NAME, TEST_KEY_SEED, TEST_SIGNER_EMAIL};
use quill_core::domain::TxStatus;
use quill_core::foundation::{DocumentUid, SignatureUid};
use quill_core::infrastructure::ledger::{LedgerKeypair, MockLedger, PollStep};
use quill_core::infrastructure::storage::{MemoryStorage, Storage};
use quill_service::service::broadcast::store_signature_tx;
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(10);

async fn broadcast(storage: Arc<MemoryStorage>, ledger: Arc<MockLedger>, signature_uid: &SignatureUid) {
    let keypair = LedgerKeypair::from_seed(TEST_KEY_SEED);
    store_signature_tx(
        storage,
        ledger,
        &keypair,
        TEST_CHAIN_NAME,
        INTERVAL,
        signature_uid,
        &DocumentUid::from("doc-1"),
        TEST_SIGNER_EMAIL,
        &fixtures::signed_payload(),
    )
    .await
    .expect("broadcast");
}

#[tokio::test]
async fn broadcasted_row_is_visible_before_confirmation() {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = Arc::new(MockLedger::new());
    let uid = SignatureUid::from("sig-1");
    ledger.script_next(vec![PollStep::Pending, PollStep::Pending, PollStep::Success]).expect("script");

    broadcast(storage.clone(), ledger.clone(), &uid).await;

    let tx = storage.get_signature_tx(&uid).expect("lookup").expect("row");
    assert_eq!(tx.status, TxStatus::Broadcasted);

    let settled = wait_for_tx_terminal(storage.as_ref(), &uid).await;
    assert_eq!(settled.status, TxStatus::Confirmed);
    assert_eq!(ledger.poll_count(&settled.tx_hash).expect("count"), 3);
}

#[tokio::test]
async fn deploy_not_known_is_retried_not_errored() {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = Arc::new(MockLedger::new());
    let uid = SignatureUid::from("sig-1");
    ledger.script_next(vec![PollStep::NotKnown, PollStep::NotKnown, PollStep::Success]).expect("script");

    broadcast(storage.clone(), ledger.clone(), &uid).await;

    let settled = wait_for_tx_terminal(storage.as_ref(), &uid).await;
    assert_eq!(settled.status, TxStatus::Confirmed);
}

#[tokio::test]
async fn execution_failure_marks_error_once_and_stops_polling() {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = Arc::new(MockLedger::new());
    let uid = SignatureUid::from("sig-1");
    ledger.script_next(vec![PollStep::Failure("out of gas".to_string())]).expect("script");

    broadcast(storage.clone(), ledger.clone(), &uid).await;

    let settled = wait_for_tx_terminal(storage.as_ref(), &uid).await;
    assert_eq!(settled.status, TxStatus::Error);

    let polls = ledger.poll_count(&settled.tx_hash).expect("count");
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(ledger.poll_count(&settled.tx_hash).expect("count"), polls);
    assert_eq!(storage.get_signature_tx(&uid).expect("lookup").expect("row").status, TxStatus::Error);
}

#[tokio::test]
async fn submit_failure_propagates_and_persists_nothing() {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = Arc::new(MockLedger::new());
    let uid = SignatureUid::from("sig-1");
    ledger.fail_next_submit("node unreachable").expect("setup");

    let keypair = LedgerKeypair::from_seed(TEST_KEY_SEED);
    let result = store_signature_tx(
        storage.clone(),
        ledger,
        &keypair,
        TEST_CHAIN_NAME,
        INTERVAL,
        &uid,
        &DocumentUid::from("doc-1"),
        TEST_SIGNER_EMAIL,
        &fixtures::signed_payload(),
    )
    .await;

    assert!(result.is_err());
    assert!(storage.get_signature_tx(&uid).expect("lookup").is_none());
}
