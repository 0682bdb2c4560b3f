pub mod audit_trail;
pub mod hashes;
pub mod model;
pub mod request_state;
pub mod status;
pub mod timeline;

pub use audit_trail::parse_audit_trail;
pub use hashes::{content_hash, identity_hash, proof_key};
pub use model::{
    Document, DocumentDetails, DocumentStatus, HistoryEntry, HistoryEventType, ProviderSignatureView, Signature,
    SignatureDetails, SignatureInfo, SignatureInfoSigned, SignatureStatus, SignatureTx, TxStatus,
};
pub use request_state::{ProviderSignature, SignatureRequestState, PROVIDER_STATUS_SIGNED};
pub use status::resolve_status;
pub use timeline::merge_timeline;
