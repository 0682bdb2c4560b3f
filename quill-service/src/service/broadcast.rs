use log::{debug, info, warn};
use quill_core::domain::{SignatureInfoSigned, SignatureTx, TxStatus};
use quill_core::foundation::{DocumentUid, Result, SignatureUid, TxHash};
use quill_core::infrastructure::ledger::deploy::store_signature_args;
use quill_core::infrastructure::ledger::{LedgerClient, LedgerKeypair};
use quill_core::infrastructure::storage::Storage;
use std::sync::Arc;
use std::time::Duration;

/// Commits a signed proof to the ledger: builds the store_signature deploy,
/// submits it, and persists a BROADCASTED transaction row before any
/// confirmation is known. Confirmation runs in a detached task; callers
/// observe progress only through the persisted status.
#[allow(clippy::too_many_arguments)]
pub async fn store_signature_tx(
    storage: Arc<dyn Storage>,
    ledger: Arc<dyn LedgerClient>,
    keypair: &LedgerKeypair,
    chain_name: &str,
    confirm_interval: Duration,
    signature_uid: &SignatureUid,
    document_uid: &DocumentUid,
    email: &str,
    signed: &SignatureInfoSigned,
) -> Result<TxHash> {
    let args = store_signature_args(document_uid.as_str(), email, signed)?;
    let deploy = ledger.build_and_sign_deploy(keypair, chain_name, args)?;
    let tx_hash = ledger.submit_deploy(&deploy).await?;

    storage.insert_signature_tx(SignatureTx {
        signature_uid: signature_uid.clone(),
        tx_hash: tx_hash.clone(),
        status: TxStatus::Broadcasted,
    })?;
    info!("signature tx broadcasted signature_uid={} document_uid={} tx_hash={}", signature_uid, document_uid, tx_hash);

    tokio::spawn(run_confirmation_loop(storage, ledger, tx_hash.clone(), confirm_interval));

    Ok(tx_hash)
}

/// Polls a broadcasted deploy until it reaches a terminal state, then writes
/// that state exactly once. Pending results and not-yet-known deploys retry
/// after a fixed backoff with no retry ceiling. Nothing here propagates to
/// the caller that spawned the loop.
pub async fn run_confirmation_loop(
    storage: Arc<dyn Storage>,
    ledger: Arc<dyn LedgerClient>,
    tx_hash: TxHash,
    interval: Duration,
) {
    loop {
        let outcome = match ledger.get_deploy_status(&tx_hash).await {
            Err(err) if err.is_retryable() => {
                debug!("deploy not known yet tx_hash={}", tx_hash);
                None
            }
            Err(err) => {
                warn!("deploy status query failed tx_hash={} error={}", tx_hash, err);
                Some(TxStatus::Error)
            }
            Ok(status) if status.is_pending() => {
                debug!("deploy pending tx_hash={}", tx_hash);
                None
            }
            Ok(status) => match status.failure() {
                Some(result) => {
                    warn!(
                        "deploy execution failed tx_hash={} error={}",
                        tx_hash,
                        result.error_message.as_deref().unwrap_or("unknown")
                    );
                    Some(TxStatus::Error)
                }
                None => Some(TxStatus::Confirmed),
            },
        };

        match outcome {
            Some(status) => {
                if let Err(err) = storage.set_tx_status(&tx_hash, status) {
                    warn!("tx status write failed tx_hash={} status={} error={}", tx_hash, status, err);
                } else {
                    info!("signature tx settled tx_hash={} status={}", tx_hash, status);
                }
                return;
            }
            None => tokio::time::sleep(interval).await,
        }
    }
}
