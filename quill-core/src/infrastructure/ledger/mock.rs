use crate::foundation::{QuillError, Result, TxHash};
use crate::infrastructure::ledger::keys::LedgerKeypair;
use crate::infrastructure::ledger::types::{DeployArgs, DeployStatus, ExecutionResult, SignedDeploy};
use crate::infrastructure::ledger::{deploy, LedgerClient};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One scripted poll outcome for a submitted deploy.
#[derive(Clone, Debug)]
pub enum PollStep {
    /// The node does not know the deploy yet.
    NotKnown,
    /// Known but not executed: empty execution results.
    Pending,
    Success,
    Failure(String),
}

struct MockInner {
    submitted: Vec<SignedDeploy>,
    /// Poll script per tx hash; once drained, polls report success.
    scripts: HashMap<String, VecDeque<PollStep>>,
    /// Script applied to the next submitted deploy.
    next_script: Option<VecDeque<PollStep>>,
    poll_counts: HashMap<String, u64>,
    state: HashMap<String, String>,
    fail_submit: Option<String>,
}

/// In-process ledger node. Submitted deploys land in a state map keyed by
/// the proof key, so the verification path can read them back; confirmation
/// polling follows a per-deploy script.
pub struct MockLedger {
    inner: Mutex<MockInner>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockInner {
                submitted: Vec::new(),
                scripts: HashMap::new(),
                next_script: None,
                poll_counts: HashMap::new(),
                state: HashMap::new(),
                fail_submit: None,
            }),
        }
    }

    fn lock_inner(&self) -> Result<std::sync::MutexGuard<'_, MockInner>> {
        self.inner.lock().map_err(|_| QuillError::ledger("mock ledger lock", "poisoned"))
    }

    /// Scripts the poll outcomes for the next submitted deploy.
    pub fn script_next(&self, steps: Vec<PollStep>) -> Result<()> {
        self.lock_inner()?.next_script = Some(steps.into());
        Ok(())
    }

    pub fn fail_next_submit(&self, details: impl Into<String>) -> Result<()> {
        self.lock_inner()?.fail_submit = Some(details.into());
        Ok(())
    }

    pub fn submitted_count(&self) -> Result<usize> {
        Ok(self.lock_inner()?.submitted.len())
    }

    pub fn last_submitted(&self) -> Result<Option<SignedDeploy>> {
        Ok(self.lock_inner()?.submitted.last().cloned())
    }

    pub fn poll_count(&self, tx_hash: &TxHash) -> Result<u64> {
        Ok(self.lock_inner()?.poll_counts.get(tx_hash.as_str()).copied().unwrap_or(0))
    }

    /// Replaces the stored state under a key, for tamper scenarios.
    pub fn overwrite_state(&self, key: &str, payload: impl Into<String>) -> Result<()> {
        self.lock_inner()?.state.insert(key.to_string(), payload.into());
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    fn build_and_sign_deploy(&self, keypair: &LedgerKeypair, chain_name: &str, args: DeployArgs) -> Result<SignedDeploy> {
        deploy::build_and_sign(keypair, chain_name, args)
    }

    async fn submit_deploy(&self, signed: &SignedDeploy) -> Result<TxHash> {
        let mut inner = self.lock_inner()?;
        if let Some(details) = inner.fail_submit.take() {
            return Err(QuillError::ledger("submit_deploy", details));
        }
        if let Some(script) = inner.next_script.take() {
            inner.scripts.insert(signed.hash.to_string(), script);
        }
        // The submitted named args, minus deploy plumbing, are exactly the
        // signed proof payload. Store it where read_state will find it.
        let mut payload = signed.args.named_args.clone();
        payload.remove("key");
        payload.remove("hash");
        let body = serde_json::to_string(&payload)?;
        inner.state.insert(signed.args.key.clone(), body);
        inner.submitted.push(signed.clone());
        Ok(signed.hash.clone())
    }

    async fn get_deploy_status(&self, tx_hash: &TxHash) -> Result<DeployStatus> {
        let mut inner = self.lock_inner()?;
        *inner.poll_counts.entry(tx_hash.to_string()).or_insert(0) += 1;
        let step = inner
            .scripts
            .get_mut(tx_hash.as_str())
            .and_then(|script| script.pop_front())
            .unwrap_or(PollStep::Success);
        match step {
            PollStep::NotKnown => Err(QuillError::DeployNotKnown { tx_hash: tx_hash.to_string() }),
            PollStep::Pending => Ok(DeployStatus::default()),
            PollStep::Success => Ok(DeployStatus {
                execution_results: vec![ExecutionResult { success: true, error_message: None }],
            }),
            PollStep::Failure(details) => Ok(DeployStatus {
                execution_results: vec![ExecutionResult { success: false, error_message: Some(details) }],
            }),
        }
    }

    async fn read_state(&self, key: &str) -> Result<String> {
        self.lock_inner()?
            .state
            .get(key)
            .cloned()
            .ok_or_else(|| QuillError::NotFound(format!("ledger state {key}")))
    }
}
