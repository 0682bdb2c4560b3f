mod mock;
mod types;

pub use mock::MockProvider;
pub use types::{ListParams, SendSignatureRequest, SignerRecipient};

use crate::domain::SignatureRequestState;
use crate::foundation::{DocumentUid, Result};
use async_trait::async_trait;

/// The e-signature provider, treated as a black box.
///
/// `download_file` fails with `QuillError::FileStillProcessing` while the
/// provider is still rendering the artifact; callers treat that as a soft
/// absence.
#[async_trait]
pub trait SignatureProvider: Send + Sync {
    async fn get(&self, uid: &DocumentUid) -> Result<SignatureRequestState>;
    async fn send(&self, request: SendSignatureRequest) -> Result<SignatureRequestState>;
    async fn list(&self, params: ListParams) -> Result<Vec<SignatureRequestState>>;
    async fn download_file(&self, uid: &DocumentUid) -> Result<Vec<u8>>;
}

/// Extracts the flat text-token stream from a rendered audit-trail artifact.
/// Decoding the page-and-line container format is this collaborator's
/// problem; the parser only sees decoded tokens.
pub trait AuditTextExtractor: Send + Sync {
    fn extract_tokens(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// Token-per-line extractor for plain-text artifacts. Real deployments plug
/// in a PDF-backed extractor.
pub struct LineTextExtractor;

impl AuditTextExtractor for LineTextExtractor {
    fn extract_tokens(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.lines().map(|line| line.trim().to_string()).filter(|line| !line.is_empty()).collect())
    }
}
