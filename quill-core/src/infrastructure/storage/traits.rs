use crate::domain::{Document, DocumentStatus, Signature, SignatureTx, TxStatus};
use crate::foundation::{ContentHash, DocumentUid, QuillError, SignatureUid, TxHash};
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, QuillError>;

/// Fields populated together at the signature's single Pending -> Signed
/// transition.
#[derive(Clone, Debug)]
pub struct SignedUpdate {
    pub payload: String,
    pub ip: String,
    pub auth_email: String,
    pub verifier: Option<String>,
    pub signed_at: DateTime<Utc>,
}

/// Persistence collaborator, keyed by the entity identities only. Schema is
/// the backend's concern.
pub trait Storage: Send + Sync {
    fn insert_document(&self, document: Document) -> Result<()>;
    fn get_document(&self, uid: &DocumentUid) -> Result<Option<Document>>;
    fn update_document_status(&self, uid: &DocumentUid, status: DocumentStatus) -> Result<()>;
    fn list_documents(&self) -> Result<Vec<Document>>;

    /// Reverse lookups powering identifier resolution.
    fn find_uid_by_hash(&self, hash: &ContentHash) -> Result<Option<DocumentUid>>;
    fn find_uid_by_signature(&self, signature_uid: &SignatureUid) -> Result<Option<DocumentUid>>;

    /// Hashes for a document, ordered by first-seen time ascending.
    fn list_hashes(&self, uid: &DocumentUid) -> Result<Vec<ContentHash>>;
    /// Appends a hash record. Dedup is the caller's read-then-insert check;
    /// the store itself never reorders or removes hashes.
    fn insert_hash(&self, uid: &DocumentUid, hash: ContentHash) -> Result<()>;

    fn insert_signature(&self, signature: Signature) -> Result<()>;
    fn get_signature(&self, uid: &SignatureUid) -> Result<Option<Signature>>;
    /// Signatures for a document in insertion order.
    fn signatures_for_document(&self, uid: &DocumentUid) -> Result<Vec<Signature>>;
    fn mark_signature_signed(&self, uid: &SignatureUid, update: SignedUpdate) -> Result<()>;

    /// At most one transaction per signature.
    fn insert_signature_tx(&self, tx: SignatureTx) -> Result<()>;
    fn get_signature_tx(&self, signature_uid: &SignatureUid) -> Result<Option<SignatureTx>>;
    /// One-way status write: terminal states never regress.
    fn set_tx_status(&self, tx_hash: &TxHash, status: TxStatus) -> Result<()>;

    fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
