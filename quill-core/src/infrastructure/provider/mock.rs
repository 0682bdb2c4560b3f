use crate::domain::{ProviderSignature, SignatureRequestState};
use crate::foundation::{DocumentUid, QuillError, Result};
use crate::infrastructure::provider::{ListParams, SendSignatureRequest, SignatureProvider};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

struct MockInner {
    requests: HashMap<String, SignatureRequestState>,
    files: HashMap<String, Vec<u8>>,
    processing: HashSet<String>,
    next_id: u64,
}

/// In-process stand-in for the e-signature provider, used by tests and local
/// tooling.
pub struct MockProvider {
    inner: Mutex<MockInner>,
    requester_email: String,
}

impl MockProvider {
    pub fn new(requester_email: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MockInner {
                requests: HashMap::new(),
                files: HashMap::new(),
                processing: HashSet::new(),
                next_id: 1,
            }),
            requester_email: requester_email.into(),
        }
    }

    fn lock_inner(&self) -> Result<std::sync::MutexGuard<'_, MockInner>> {
        self.inner
            .lock()
            .map_err(|_| QuillError::provider("mock provider lock", "poisoned"))
    }

    pub fn seed_request(&self, state: SignatureRequestState) -> Result<()> {
        self.lock_inner()?.requests.insert(state.signature_request_id.to_lowercase(), state);
        Ok(())
    }

    pub fn seed_file(&self, uid: &DocumentUid, bytes: Vec<u8>) -> Result<()> {
        self.lock_inner()?.files.insert(uid.to_string(), bytes);
        Ok(())
    }

    /// Makes downloads for the document fail with FileStillProcessing.
    pub fn set_processing(&self, uid: &DocumentUid, processing: bool) -> Result<()> {
        let mut inner = self.lock_inner()?;
        if processing {
            inner.processing.insert(uid.to_string());
        } else {
            inner.processing.remove(uid.as_str());
        }
        Ok(())
    }

    /// Flips one signature to the provider's signed status.
    pub fn mark_signed(&self, uid: &DocumentUid, email: &str) -> Result<()> {
        let mut inner = self.lock_inner()?;
        let state = inner
            .requests
            .get_mut(uid.as_str())
            .ok_or_else(|| QuillError::NotFound(uid.to_string()))?;
        for sig in &mut state.signatures {
            if sig.email.eq_ignore_ascii_case(email) {
                sig.status_code = crate::domain::PROVIDER_STATUS_SIGNED.to_string();
                sig.signed_at = Some(crate::foundation::now_utc());
            }
        }
        state.is_complete = state.signatures.iter().all(|sig| sig.is_signed());
        Ok(())
    }
}

#[async_trait]
impl SignatureProvider for MockProvider {
    async fn get(&self, uid: &DocumentUid) -> Result<SignatureRequestState> {
        self.lock_inner()?
            .requests
            .get(uid.as_str())
            .cloned()
            .ok_or_else(|| QuillError::NotFound(uid.to_string()))
    }

    async fn send(&self, request: SendSignatureRequest) -> Result<SignatureRequestState> {
        let mut inner = self.lock_inner()?;
        let id = format!("req-{:06}", inner.next_id);
        inner.next_id += 1;

        let signatures = request
            .signers
            .iter()
            .enumerate()
            .map(|(index, signer)| ProviderSignature {
                signature_id: format!("{id}-sig-{index}"),
                email: signer.email.clone(),
                name: signer.name.clone(),
                status_code: "awaiting_signature".to_string(),
                signed_at: None,
            })
            .collect();

        let state = SignatureRequestState {
            signature_request_id: id.clone(),
            title: request.title,
            is_complete: false,
            is_declined: false,
            requester_email: self.requester_email.clone(),
            signatures,
        };

        if let Some(file) = request.file {
            inner.files.insert(id.clone(), file);
        }
        inner.requests.insert(id, state.clone());
        Ok(state)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<SignatureRequestState>> {
        let inner = self.lock_inner()?;
        let mut items: Vec<SignatureRequestState> = inner.requests.values().cloned().collect();
        items.sort_by(|a, b| a.signature_request_id.cmp(&b.signature_request_id));
        if let Some(size) = params.page_size {
            items.truncate(size as usize);
        }
        Ok(items)
    }

    async fn download_file(&self, uid: &DocumentUid) -> Result<Vec<u8>> {
        let inner = self.lock_inner()?;
        if inner.processing.contains(uid.as_str()) {
            return Err(QuillError::FileStillProcessing { document_uid: uid.to_string() });
        }
        inner
            .files
            .get(uid.as_str())
            .cloned()
            .ok_or_else(|| QuillError::NotFound(uid.to_string()))
    }
}
