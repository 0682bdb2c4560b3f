use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider status code for a signature that has been applied.
pub const PROVIDER_STATUS_SIGNED: &str = "signed";

/// Live state of a signature request as reported by the provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignatureRequestState {
    pub signature_request_id: String,
    pub title: String,
    pub is_complete: bool,
    pub is_declined: bool,
    /// Email of the account that created the request.
    pub requester_email: String,
    pub signatures: Vec<ProviderSignature>,
}

/// Provider-side view of one recipient's signature.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProviderSignature {
    pub signature_id: String,
    pub email: String,
    pub name: String,
    pub status_code: String,
    pub signed_at: Option<DateTime<Utc>>,
}

impl ProviderSignature {
    pub fn is_signed(&self) -> bool {
        self.status_code == PROVIDER_STATUS_SIGNED
    }
}

impl SignatureRequestState {
    /// Signature belonging to the request's creator, matched by email.
    pub fn requester_signature(&self) -> Option<&ProviderSignature> {
        let requester = self.requester_email.to_lowercase();
        self.signatures.iter().find(|sig| sig.email.to_lowercase() == requester)
    }
}
