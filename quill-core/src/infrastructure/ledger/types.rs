use crate::foundation::TxHash;
use serde::{Deserialize, Serialize};

/// Contract invocation embedding every proof field as a named argument,
/// addressed by the proof key.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeployArgs {
    pub contract: String,
    pub entry_point: String,
    /// `sha256("{document_uid}:{recipient_email}")` — the on-chain address
    /// of this proof.
    pub key: String,
    pub named_args: serde_json::Map<String, serde_json::Value>,
}

/// A constructed and signed unit of ledger work, ready for submission.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignedDeploy {
    pub hash: TxHash,
    pub account: String,
    pub chain_name: String,
    pub args: DeployArgs,
    pub signature: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Poll response for a submitted deploy. Empty results mean the deploy is
/// known but not yet executed.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DeployStatus {
    pub execution_results: Vec<ExecutionResult>,
}

impl DeployStatus {
    pub fn is_pending(&self) -> bool {
        self.execution_results.is_empty()
    }

    /// First failed result, if any.
    pub fn failure(&self) -> Option<&ExecutionResult> {
        self.execution_results.iter().find(|result| !result.success)
    }
}
