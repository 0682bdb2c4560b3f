use serde::{Deserialize, Serialize};

/// One recipient of a new signature request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignerRecipient {
    pub email: String,
    pub name: String,
}

/// Options for sending a document out for signature.
#[derive(Clone, Debug)]
pub struct SendSignatureRequest {
    pub title: String,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub signers: Vec<SignerRecipient>,
    /// Original upload, when available at send time.
    pub file: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
