use crate::domain::hashes::proof_key;
use crate::domain::SignatureInfoSigned;
use crate::foundation::constants::{SIGNATURE_CONTRACT_NAME, STORE_SIGNATURE_ENTRY_POINT};
use crate::foundation::{sha256_hex, QuillError, Result, TxHash};
use crate::infrastructure::ledger::keys::LedgerKeypair;
use crate::infrastructure::ledger::types::{DeployArgs, SignedDeploy};

/// Maps a signed proof payload onto the store_signature contract call:
/// every payload field becomes a named argument, keyed by the proof key
/// derived from `(document_uid, email)`.
pub fn store_signature_args(document_uid: &str, email: &str, signed: &SignatureInfoSigned) -> Result<DeployArgs> {
    let value = serde_json::to_value(signed)?;
    let serde_json::Value::Object(named_args) = value else {
        return Err(QuillError::SerializationError {
            format: "json".to_string(),
            details: "proof payload did not serialize to an object".to_string(),
        });
    };
    Ok(DeployArgs {
        contract: SIGNATURE_CONTRACT_NAME.to_string(),
        entry_point: STORE_SIGNATURE_ENTRY_POINT.to_string(),
        key: proof_key(document_uid, email),
        named_args,
    })
}

/// Constructs the deploy body, hashes it, and signs the hash with the
/// service keypair. The deploy hash doubles as the transaction hash the
/// ledger reports back.
pub fn build_and_sign(keypair: &LedgerKeypair, chain_name: &str, args: DeployArgs) -> Result<SignedDeploy> {
    let account = keypair.account_hex();
    let body = serde_json::to_vec(&(&account, chain_name, &args))?;
    let hash = sha256_hex(&body);
    let signature = keypair.sign_hex(hash.as_bytes());
    Ok(SignedDeploy { hash: TxHash::new(hash), account, chain_name: chain_name.to_string(), args, signature })
}
