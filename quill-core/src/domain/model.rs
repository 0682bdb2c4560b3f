use crate::foundation::{ContentHash, DocumentUid, SignatureUid, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical document lifecycle status, derived from provider state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    OutForSignature,
    AwaitingMySignature,
    Completed,
    Declined,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentStatus::OutForSignature => "OUT_FOR_SIGNATURE",
            DocumentStatus::AwaitingMySignature => "AWAITING_MY_SIGNATURE",
            DocumentStatus::Completed => "COMPLETED",
            DocumentStatus::Declined => "DECLINED",
        };
        f.write_str(label)
    }
}

/// One signature-request workflow instance, identified by provider uid.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Document {
    pub uid: DocumentUid,
    pub title: String,
    pub status: DocumentStatus,
    pub owner_email: String,
    pub owner_name: String,
    /// Digest of the original upload; set only when the file was available
    /// at creation time.
    pub original_hash: Option<ContentHash>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureStatus {
    Pending,
    Signed,
}

/// One recipient's participation record within a document.
///
/// Mutated exactly once, at signing time: status flips to Signed and
/// payload/ip/auth_email/signed_at are populated together.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Signature {
    pub uid: SignatureUid,
    pub document_uid: DocumentUid,
    /// Recipient assigned at send time. Immutable.
    pub recipient_email: String,
    /// Email the signer actually authenticated with. May differ from the
    /// recipient when signing was delegated.
    pub auth_email: Option<String>,
    pub name: String,
    pub ip: Option<String>,
    pub status: SignatureStatus,
    /// Serialized `SignatureInfoSigned`, set at the Signed transition.
    pub payload: Option<String>,
    /// External identity-proof token supplied by the signer.
    pub verifier: Option<String>,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Signature {
    pub fn completed(&self) -> bool {
        self.status == SignatureStatus::Signed
    }
}

/// Ledger transaction status. One-way: Broadcasted, then exactly one of
/// Confirmed or Error. Never regresses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    Broadcasted,
    Confirmed,
    Error,
}

impl TxStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Confirmed | TxStatus::Error)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TxStatus::Broadcasted => "BROADCASTED",
            TxStatus::Confirmed => "CONFIRMED",
            TxStatus::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// At most one ledger transaction record per signature.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignatureTx {
    pub signature_uid: SignatureUid,
    pub tx_hash: TxHash,
    pub status: TxStatus,
}

/// The proof payload committed to the ledger, addressable on-chain by a key
/// derived from `(document_uid, recipient_email)`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignatureInfo {
    pub verifier: String,
    pub signer_hash: String,
    pub recipient_hash: String,
    pub ip_hash: String,
    pub timestamp: u64,
    pub original_document_hash: String,
    pub other_signatures: Vec<String>,
    pub document_hashes: Vec<String>,
    pub signer_pubkey: String,
}

/// `SignatureInfo` plus the signer's signature over its fields.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignatureInfoSigned {
    #[serde(flatten)]
    pub info: SignatureInfo,
    pub signature: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEventType {
    Sent,
    Viewed,
    Signed,
    Completed,
    SignedOnChain,
}

/// A point-in-time timeline event. Computed on demand, never persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub kind: HistoryEventType,
    pub timestamp: Option<DateTime<Utc>>,
    pub ip: Option<String>,
    pub email: Option<String>,
    pub description: String,
    pub tx_hash: Option<TxHash>,
}

impl HistoryEntry {
    pub fn new(kind: HistoryEventType) -> Self {
        Self { kind, timestamp: None, ip: None, email: None, description: String::new(), tx_hash: None }
    }
}

/// Per-signature view merging local state with the provider's live state.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignatureDetails {
    pub signature_uid: SignatureUid,
    pub recipient_email: String,
    pub auth_email: Option<String>,
    pub name: String,
    pub ip: Option<String>,
    pub completed: bool,
    pub payload: Option<String>,
    pub tx_hash: Option<TxHash>,
    pub tx_status: Option<TxStatus>,
    pub signed_at: Option<DateTime<Utc>>,
    /// Provider-side view of the same signature.
    pub provider: Option<ProviderSignatureView>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProviderSignatureView {
    pub is_owner: bool,
    pub email: String,
    pub name: String,
    pub status_code: String,
    pub signed_at: Option<DateTime<Utc>>,
}

/// Aggregate view assembled by the reconciler.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DocumentDetails {
    pub document_uid: DocumentUid,
    pub title: String,
    pub status: DocumentStatus,
    pub created_by_email: String,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub original_hash: Option<ContentHash>,
    pub signatures: Vec<SignatureDetails>,
    pub hashes: Vec<ContentHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}
