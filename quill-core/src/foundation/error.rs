use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    ValidationFailure,
    StorageError,
    SerializationError,
    ProviderError,
    FileStillProcessing,
    LedgerError,
    DeployNotKnown,
    DeployFailed,
    VerificationMismatch,
    CryptoError,
    ParseError,
    ConfigError,
    InvalidStateTransition,
    Message,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum QuillError {
    #[error("document not found for identifier: {0}")]
    NotFound(String),

    #[error("invalid request payload: {0}")]
    ValidationFailure(String),

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("provider error during {operation}: {details}")]
    ProviderError { operation: String, details: String },

    /// The provider has not finished rendering the requested file.
    /// Callers treat this as a soft absence, never a hard failure.
    #[error("provider file still processing for document {document_uid}")]
    FileStillProcessing { document_uid: String },

    #[error("ledger error during {operation}: {details}")]
    LedgerError { operation: String, details: String },

    /// The ledger node does not know the deploy yet. Retryable.
    #[error("deploy not known yet: {tx_hash}")]
    DeployNotKnown { tx_hash: String },

    #[error("deploy failed: {tx_hash}: {details}")]
    DeployFailed { tx_hash: String, details: String },

    #[error("signature proof mismatch for document {document_uid}, recipient {email}")]
    VerificationMismatch { document_uid: String, email: String },

    #[error("crypto error during {operation}: {details}")]
    CryptoError { operation: String, details: String },

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, QuillError>;

impl QuillError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuillError::NotFound(_) => ErrorCode::NotFound,
            QuillError::ValidationFailure(_) => ErrorCode::ValidationFailure,
            QuillError::StorageError { .. } => ErrorCode::StorageError,
            QuillError::SerializationError { .. } => ErrorCode::SerializationError,
            QuillError::ProviderError { .. } => ErrorCode::ProviderError,
            QuillError::FileStillProcessing { .. } => ErrorCode::FileStillProcessing,
            QuillError::LedgerError { .. } => ErrorCode::LedgerError,
            QuillError::DeployNotKnown { .. } => ErrorCode::DeployNotKnown,
            QuillError::DeployFailed { .. } => ErrorCode::DeployFailed,
            QuillError::VerificationMismatch { .. } => ErrorCode::VerificationMismatch,
            QuillError::CryptoError { .. } => ErrorCode::CryptoError,
            QuillError::ParseError(_) => ErrorCode::ParseError,
            QuillError::ConfigError(_) => ErrorCode::ConfigError,
            QuillError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            QuillError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    pub fn storage(operation: impl Into<String>, details: impl Into<String>) -> Self {
        QuillError::StorageError { operation: operation.into(), details: details.into() }
    }

    pub fn provider(operation: impl Into<String>, details: impl Into<String>) -> Self {
        QuillError::ProviderError { operation: operation.into(), details: details.into() }
    }

    pub fn ledger(operation: impl Into<String>, details: impl Into<String>) -> Self {
        QuillError::LedgerError { operation: operation.into(), details: details.into() }
    }

    /// True for conditions the broadcast confirmation loop retries
    /// transparently instead of surfacing.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuillError::DeployNotKnown { .. })
    }
}

impl From<hex::FromHexError> for QuillError {
    fn from(err: hex::FromHexError) -> Self {
        QuillError::ParseError(format!("hex decode error: {}", err))
    }
}

impl From<serde_json::Error> for QuillError {
    fn from(err: serde_json::Error) -> Self {
        QuillError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<io::Error> for QuillError {
    fn from(err: io::Error) -> Self {
        QuillError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `QuillError` variants at the call site to preserve context.
