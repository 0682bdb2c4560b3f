use crate::domain::{Document, DocumentStatus, Signature, SignatureStatus, SignatureTx, TxStatus};
use crate::foundation::{ContentHash, DocumentUid, QuillError, SignatureUid, TxHash};
use crate::infrastructure::storage::{SignedUpdate, Storage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

struct MemoryInner {
    documents: HashMap<DocumentUid, Document>,
    document_order: Vec<DocumentUid>,
    hashes: HashMap<DocumentUid, Vec<ContentHash>>,
    signatures: HashMap<SignatureUid, Signature>,
    signature_order: HashMap<DocumentUid, Vec<SignatureUid>>,
    txs: HashMap<SignatureUid, SignatureTx>,
    tx_by_hash: HashMap<TxHash, SignatureUid>,
}

impl MemoryInner {
    fn new() -> Self {
        Self {
            documents: HashMap::new(),
            document_order: Vec::new(),
            hashes: HashMap::new(),
            signatures: HashMap::new(),
            signature_order: HashMap::new(),
            txs: HashMap::new(),
            tx_by_hash: HashMap::new(),
        }
    }
}

pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::new())) }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>, QuillError> {
        self.inner.lock().map_err(|_| QuillError::StorageError {
            operation: "memory storage lock".to_string(),
            details: "poisoned".to_string(),
        })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn insert_document(&self, document: Document) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        let uid = document.uid.clone();
        if inner.documents.contains_key(&uid) {
            return Err(QuillError::storage("insert_document", format!("document already exists: {uid}")));
        }
        inner.document_order.push(uid.clone());
        inner.documents.insert(uid, document);
        Ok(())
    }

    fn get_document(&self, uid: &DocumentUid) -> Result<Option<Document>, QuillError> {
        Ok(self.lock_inner()?.documents.get(uid).cloned())
    }

    fn update_document_status(&self, uid: &DocumentUid, status: DocumentStatus) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        let document = inner
            .documents
            .get_mut(uid)
            .ok_or_else(|| QuillError::NotFound(uid.to_string()))?;
        document.status = status;
        Ok(())
    }

    fn list_documents(&self) -> Result<Vec<Document>, QuillError> {
        let inner = self.lock_inner()?;
        Ok(inner.document_order.iter().filter_map(|uid| inner.documents.get(uid).cloned()).collect())
    }

    fn find_uid_by_hash(&self, hash: &ContentHash) -> Result<Option<DocumentUid>, QuillError> {
        let inner = self.lock_inner()?;
        Ok(inner
            .hashes
            .iter()
            .find(|(_, hashes)| hashes.contains(hash))
            .map(|(uid, _)| uid.clone()))
    }

    fn find_uid_by_signature(&self, signature_uid: &SignatureUid) -> Result<Option<DocumentUid>, QuillError> {
        Ok(self.lock_inner()?.signatures.get(signature_uid).map(|sig| sig.document_uid.clone()))
    }

    fn list_hashes(&self, uid: &DocumentUid) -> Result<Vec<ContentHash>, QuillError> {
        Ok(self.lock_inner()?.hashes.get(uid).cloned().unwrap_or_default())
    }

    fn insert_hash(&self, uid: &DocumentUid, hash: ContentHash) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        if !inner.documents.contains_key(uid) {
            return Err(QuillError::NotFound(uid.to_string()));
        }
        inner.hashes.entry(uid.clone()).or_default().push(hash);
        Ok(())
    }

    fn insert_signature(&self, signature: Signature) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        let uid = signature.uid.clone();
        if inner.signatures.contains_key(&uid) {
            return Err(QuillError::storage("insert_signature", format!("signature already exists: {uid}")));
        }
        inner.signature_order.entry(signature.document_uid.clone()).or_default().push(uid.clone());
        inner.signatures.insert(uid, signature);
        Ok(())
    }

    fn get_signature(&self, uid: &SignatureUid) -> Result<Option<Signature>, QuillError> {
        Ok(self.lock_inner()?.signatures.get(uid).cloned())
    }

    fn signatures_for_document(&self, uid: &DocumentUid) -> Result<Vec<Signature>, QuillError> {
        let inner = self.lock_inner()?;
        let Some(order) = inner.signature_order.get(uid) else {
            return Ok(Vec::new());
        };
        Ok(order.iter().filter_map(|sig_uid| inner.signatures.get(sig_uid).cloned()).collect())
    }

    fn mark_signature_signed(&self, uid: &SignatureUid, update: SignedUpdate) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        let signature = inner
            .signatures
            .get_mut(uid)
            .ok_or_else(|| QuillError::NotFound(uid.to_string()))?;
        if signature.status == SignatureStatus::Signed {
            return Err(QuillError::InvalidStateTransition {
                from: "SIGNED".to_string(),
                to: "SIGNED".to_string(),
            });
        }
        signature.status = SignatureStatus::Signed;
        signature.payload = Some(update.payload);
        signature.ip = Some(update.ip);
        signature.auth_email = Some(update.auth_email);
        signature.verifier = update.verifier;
        signature.signed_at = Some(update.signed_at);
        Ok(())
    }

    fn insert_signature_tx(&self, tx: SignatureTx) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        if inner.txs.contains_key(&tx.signature_uid) {
            return Err(QuillError::storage(
                "insert_signature_tx",
                format!("transaction already exists for signature: {}", tx.signature_uid),
            ));
        }
        inner.tx_by_hash.insert(tx.tx_hash.clone(), tx.signature_uid.clone());
        inner.txs.insert(tx.signature_uid.clone(), tx);
        Ok(())
    }

    fn get_signature_tx(&self, signature_uid: &SignatureUid) -> Result<Option<SignatureTx>, QuillError> {
        Ok(self.lock_inner()?.txs.get(signature_uid).cloned())
    }

    fn set_tx_status(&self, tx_hash: &TxHash, status: TxStatus) -> Result<(), QuillError> {
        let mut inner = self.lock_inner()?;
        let Some(signature_uid) = inner.tx_by_hash.get(tx_hash).cloned() else {
            return Err(QuillError::NotFound(tx_hash.to_string()));
        };
        let tx = inner
            .txs
            .get_mut(&signature_uid)
            .ok_or_else(|| QuillError::NotFound(tx_hash.to_string()))?;
        if tx.status.is_terminal() && tx.status != status {
            return Err(QuillError::InvalidStateTransition { from: tx.status.to_string(), to: status.to_string() });
        }
        tx.status = status;
        Ok(())
    }
}
