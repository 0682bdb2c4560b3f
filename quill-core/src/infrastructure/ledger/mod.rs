pub mod deploy;
mod keys;
mod mock;
mod types;

pub use keys::LedgerKeypair;
pub use mock::{MockLedger, PollStep};
pub use types::{DeployArgs, DeployStatus, ExecutionResult, SignedDeploy};

use crate::foundation::{Result, TxHash};
use async_trait::async_trait;

/// Client for the append-only proof ledger.
///
/// `get_deploy_status` fails with `QuillError::DeployNotKnown` while the node
/// has not yet seen the deploy; that condition is retryable and the
/// confirmation loop treats it like a pending status.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Deploy construction is deterministic and local; no network.
    fn build_and_sign_deploy(&self, keypair: &LedgerKeypair, chain_name: &str, args: DeployArgs) -> Result<SignedDeploy>;

    async fn submit_deploy(&self, signed: &SignedDeploy) -> Result<TxHash>;

    async fn get_deploy_status(&self, tx_hash: &TxHash) -> Result<DeployStatus>;

    /// Reads the raw state payload stored under a proof key.
    async fn read_state(&self, key: &str) -> Result<String>;
}
