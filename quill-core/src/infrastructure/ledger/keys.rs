use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

/// The service's Ed25519 ledger keypair. Constructed once at startup and
/// shared read-only.
pub struct LedgerKeypair {
    signing_key: SigningKey,
}

impl LedgerKeypair {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self { signing_key: SigningKey::from_bytes(&seed) }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Account identifier on the ledger: hex of the public key.
    pub fn account_hex(&self) -> String {
        hex::encode(self.verifying_key().as_bytes())
    }

    pub fn sign_hex(&self, message: &[u8]) -> String {
        hex::encode(self.signing_key.sign(message).to_bytes())
    }
}
