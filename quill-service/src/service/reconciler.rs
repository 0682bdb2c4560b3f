use crate::service::{broadcast, hash_ledger, status};
use crate::service::flow::ServiceFlow;
use log::{debug, info};
use quill_core::domain::{
    content_hash, identity_hash, merge_timeline, parse_audit_trail, Document, DocumentDetails, DocumentStatus,
    ProviderSignature, ProviderSignatureView, Signature, SignatureDetails, SignatureInfo, SignatureInfoSigned,
    SignatureRequestState, SignatureStatus,
};
use quill_core::foundation::{now_secs, now_utc, ContentHash, DocumentUid, QuillError, Result, SignatureUid};
use quill_core::infrastructure::provider::{ListParams, SendSignatureRequest};
use quill_core::infrastructure::storage::SignedUpdate;

/// A signer's submission: the identity-proof token, the signer's public key,
/// and the signer's signature over the proof payload.
#[derive(Clone, Debug)]
pub struct SignRequest {
    pub document_uid: DocumentUid,
    pub signature_uid: SignatureUid,
    pub auth_email: String,
    pub verifier: String,
    pub signer_pubkey: String,
    pub signature: String,
}

impl ServiceFlow {
    /// Resolves an opaque identifier to a document uid. Tried in order:
    /// known content hash, known signature uid, literal document uid.
    pub fn resolve_identifier(&self, identifier: &str) -> Result<DocumentUid> {
        let storage = self.storage();

        if let Some(uid) = storage.find_uid_by_hash(&ContentHash::from(identifier))? {
            return Ok(uid);
        }
        if let Some(uid) = storage.find_uid_by_signature(&SignatureUid::from(identifier))? {
            return Ok(uid);
        }
        let uid = DocumentUid::from(identifier);
        if storage.get_document(&uid)?.is_some() {
            return Ok(uid);
        }
        Err(QuillError::NotFound(identifier.to_string()))
    }

    /// Reconciles local and provider state for one document and assembles
    /// the aggregate view.
    ///
    /// Unless `skip_download`, the current rendered file is fetched from the
    /// provider; a file still being rendered is a soft absence, not an
    /// error. A fetched file feeds its hash into the hash history, and with
    /// `with_history` its audit trail is parsed and merged into a timeline.
    pub async fn get_document_details(&self, identifier: &str, with_history: bool, skip_download: bool) -> Result<DocumentDetails> {
        let uid = self.resolve_identifier(identifier)?;
        let storage = self.storage();

        let document = storage.get_document(&uid)?.ok_or_else(|| QuillError::NotFound(uid.to_string()))?;
        let state = self.provider().get(&uid).await?;
        let doc_status = status::resolve_and_persist(storage.as_ref(), &uid, &state)?;
        let sender_name = state.requester_signature().map(|sig| sig.name.clone()).unwrap_or(document.owner_name);

        let file = if skip_download { None } else { self.download_if_ready(&uid).await? };
        let incoming: Vec<ContentHash> = file.as_deref().map(content_hash).into_iter().collect();
        let hashes = hash_ledger::get_and_update_hashes(storage.as_ref(), &uid, &incoming)?;

        let mut signatures = Vec::new();
        for signature in storage.signatures_for_document(&uid)? {
            signatures.push(self.signature_details(signature, &state)?);
        }

        let history = match (&file, with_history) {
            (Some(bytes), true) => {
                let tokens = self.extractor().extract_tokens(bytes)?;
                let parsed = parse_audit_trail(&tokens);
                Some(merge_timeline(&signatures, parsed))
            }
            _ => None,
        };

        Ok(DocumentDetails {
            document_uid: uid,
            title: document.title,
            status: doc_status,
            created_by_email: document.owner_email,
            created_by_name: sender_name,
            created_at: document.created_at,
            original_hash: document.original_hash,
            signatures,
            hashes,
            history,
        })
    }

    /// Sends a new signature request through the provider and records the
    /// document plus one pending signature per recipient.
    pub async fn send_for_signatures(&self, request: SendSignatureRequest) -> Result<DocumentDetails> {
        let original_hash = request.file.as_deref().map(content_hash);
        let state = self.provider().send(request).await?;
        let uid = DocumentUid::from(state.signature_request_id.as_str());
        let storage = self.storage();

        storage.insert_document(Document {
            uid: uid.clone(),
            title: state.title.clone(),
            status: DocumentStatus::OutForSignature,
            owner_email: state.requester_email.clone(),
            owner_name: state.requester_signature().map(|sig| sig.name.clone()).unwrap_or_default(),
            original_hash: original_hash.clone(),
            created_at: now_utc(),
        })?;
        if let Some(hash) = original_hash {
            storage.insert_hash(&uid, hash)?;
        }

        for provider_sig in &state.signatures {
            storage.insert_signature(Signature {
                uid: SignatureUid::from(provider_sig.signature_id.as_str()),
                document_uid: uid.clone(),
                recipient_email: provider_sig.email.clone(),
                auth_email: None,
                name: provider_sig.name.clone(),
                ip: None,
                status: SignatureStatus::Pending,
                payload: None,
                verifier: None,
                signed_at: None,
                created_at: now_utc(),
            })?;
        }
        info!("signature request sent document_uid={} recipients={}", uid, state.signatures.len());

        self.get_document_details(uid.as_str(), false, true).await
    }

    /// Applies a signer's submission: marks the signature signed exactly
    /// once, commits the signed proof to the ledger, and returns refreshed
    /// details. Malformed or mismatched submissions fail validation before
    /// any state changes.
    pub async fn sign(&self, ip: &str, request: SignRequest) -> Result<DocumentDetails> {
        if request.verifier.trim().is_empty() || request.signer_pubkey.trim().is_empty() || request.signature.trim().is_empty() {
            return Err(QuillError::ValidationFailure("verifier, signer_pubkey and signature are required".to_string()));
        }
        let storage = self.storage();

        let signature = storage
            .get_signature(&request.signature_uid)?
            .ok_or_else(|| QuillError::ValidationFailure(format!("unknown signature: {}", request.signature_uid)))?;
        if signature.document_uid != request.document_uid {
            return Err(QuillError::ValidationFailure(format!(
                "signature {} does not belong to document {}",
                request.signature_uid, request.document_uid
            )));
        }
        if signature.completed() {
            return Err(QuillError::ValidationFailure(format!("signature already signed: {}", request.signature_uid)));
        }
        let document = storage
            .get_document(&request.document_uid)?
            .ok_or_else(|| QuillError::NotFound(request.document_uid.to_string()))?;

        let hashes = storage.list_hashes(&request.document_uid)?;
        let other_signatures = other_proof_signatures(&storage.signatures_for_document(&request.document_uid)?, &signature.uid);

        let info = SignatureInfo {
            verifier: request.verifier.clone(),
            signer_hash: identity_hash(&request.auth_email),
            recipient_hash: identity_hash(&signature.recipient_email),
            ip_hash: identity_hash(ip),
            timestamp: now_secs(),
            original_document_hash: document.original_hash.map(|hash| hash.to_string()).unwrap_or_default(),
            other_signatures,
            document_hashes: hashes.iter().map(|hash| hash.to_string()).collect(),
            signer_pubkey: request.signer_pubkey.clone(),
        };
        let signed = SignatureInfoSigned { info, signature: request.signature.clone() };
        let payload = serde_json::to_string(&signed)?;

        storage.mark_signature_signed(
            &request.signature_uid,
            SignedUpdate {
                payload,
                ip: ip.to_string(),
                auth_email: request.auth_email.clone(),
                verifier: Some(request.verifier.clone()),
                signed_at: now_utc(),
            },
        )?;
        info!("signature applied document_uid={} signature_uid={}", request.document_uid, request.signature_uid);

        broadcast::store_signature_tx(
            storage,
            self.ledger(),
            self.keypair(),
            self.chain_name(),
            self.confirm_interval(),
            &request.signature_uid,
            &request.document_uid,
            &signature.recipient_email,
            &signed,
        )
        .await?;

        self.get_document_details(request.document_uid.as_str(), false, true).await
    }

    /// Identifier resolution plus a pure hash read. Never mutates.
    pub fn get_hashes(&self, identifier: &str) -> Result<Vec<ContentHash>> {
        let uid = self.resolve_identifier(identifier)?;
        self.storage().list_hashes(&uid)
    }

    /// Summaries for the provider's paged listing. Requests without a local
    /// document record are skipped.
    pub async fn list_documents(&self, params: ListParams) -> Result<Vec<DocumentDetails>> {
        let states = self.provider().list(params).await?;
        let storage = self.storage();

        let mut documents = Vec::new();
        for state in states {
            let uid = DocumentUid::from(state.signature_request_id.as_str());
            if storage.get_document(&uid)?.is_none() {
                debug!("skipping provider request without local record document_uid={}", uid);
                continue;
            }
            documents.push(self.get_document_details(uid.as_str(), false, true).await?);
        }
        Ok(documents)
    }

    async fn download_if_ready(&self, uid: &DocumentUid) -> Result<Option<Vec<u8>>> {
        match self.provider().download_file(uid).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(QuillError::FileStillProcessing { .. }) => {
                debug!("provider file still processing document_uid={}", uid);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn signature_details(&self, signature: Signature, state: &SignatureRequestState) -> Result<SignatureDetails> {
        let tx = self.storage().get_signature_tx(&signature.uid)?;
        let provider = find_provider_signature(state, &signature).map(|provider_sig| ProviderSignatureView {
            is_owner: provider_sig.email.eq_ignore_ascii_case(&state.requester_email),
            email: provider_sig.email.clone(),
            name: provider_sig.name.clone(),
            status_code: provider_sig.status_code.clone(),
            signed_at: provider_sig.signed_at,
        });

        Ok(SignatureDetails {
            signature_uid: signature.uid,
            recipient_email: signature.recipient_email,
            auth_email: signature.auth_email,
            name: signature.name,
            ip: signature.ip,
            completed: signature.status == SignatureStatus::Signed,
            payload: signature.payload,
            tx_hash: tx.as_ref().map(|tx| tx.tx_hash.clone()),
            tx_status: tx.map(|tx| tx.status),
            signed_at: signature.signed_at,
            provider,
        })
    }
}

fn find_provider_signature<'a>(state: &'a SignatureRequestState, signature: &Signature) -> Option<&'a ProviderSignature> {
    state
        .signatures
        .iter()
        .find(|provider_sig| provider_sig.signature_id == signature.uid.as_str())
        .or_else(|| state.signatures.iter().find(|provider_sig| provider_sig.email.eq_ignore_ascii_case(&signature.recipient_email)))
}

/// Proof signatures of the other recipients that already signed, in
/// insertion order. Unparseable payloads are skipped.
fn other_proof_signatures(signatures: &[Signature], current: &SignatureUid) -> Vec<String> {
    signatures
        .iter()
        .filter(|sig| &sig.uid != current && sig.completed())
        .filter_map(|sig| sig.payload.as_deref())
        .filter_map(|payload| serde_json::from_str::<SignatureInfoSigned>(payload).ok())
        .map(|signed| signed.signature)
        .collect()
}
