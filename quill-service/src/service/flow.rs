use quill_core::foundation::constants::CONFIRM_POLL_INTERVAL;
use quill_core::infrastructure::ledger::{LedgerClient, LedgerKeypair};
use quill_core::infrastructure::provider::{AuditTextExtractor, SignatureProvider};
use quill_core::infrastructure::storage::Storage;
use std::sync::Arc;
use std::time::Duration;

/// Process-wide service bundle. Collaborators are constructed once at
/// startup and shared read-only across requests and background tasks.
pub struct ServiceFlow {
    storage: Arc<dyn Storage>,
    provider: Arc<dyn SignatureProvider>,
    ledger: Arc<dyn LedgerClient>,
    extractor: Arc<dyn AuditTextExtractor>,
    keypair: Arc<LedgerKeypair>,
    chain_name: String,
    confirm_interval: Duration,
}

impl ServiceFlow {
    pub fn new(
        storage: Arc<dyn Storage>,
        provider: Arc<dyn SignatureProvider>,
        ledger: Arc<dyn LedgerClient>,
        extractor: Arc<dyn AuditTextExtractor>,
        keypair: Arc<LedgerKeypair>,
        chain_name: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            provider,
            ledger,
            extractor,
            keypair,
            chain_name: chain_name.into(),
            confirm_interval: CONFIRM_POLL_INTERVAL,
        }
    }

    /// Overrides the confirmation poll interval. Tests use short intervals.
    pub fn with_confirm_interval(mut self, interval: Duration) -> Self {
        self.confirm_interval = interval;
        self
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn provider(&self) -> Arc<dyn SignatureProvider> {
        self.provider.clone()
    }

    pub fn ledger(&self) -> Arc<dyn LedgerClient> {
        self.ledger.clone()
    }

    pub fn extractor(&self) -> Arc<dyn AuditTextExtractor> {
        self.extractor.clone()
    }

    pub fn keypair(&self) -> &LedgerKeypair {
        &self.keypair
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn confirm_interval(&self) -> Duration {
        self.confirm_interval
    }
}
