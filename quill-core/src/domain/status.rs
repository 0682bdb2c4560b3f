use crate::domain::model::DocumentStatus;
use crate::domain::request_state::SignatureRequestState;

/// Derives the canonical document status from the provider's live request
/// state. First match wins:
///
/// 1. request fully complete -> Completed
/// 2. declined by any party -> Declined
/// 3. requester has not signed while every other signer has -> AwaitingMySignature
/// 4. otherwise -> OutForSignature
pub fn resolve_status(state: &SignatureRequestState) -> DocumentStatus {
    if state.is_complete {
        return DocumentStatus::Completed;
    }
    if state.is_declined {
        return DocumentStatus::Declined;
    }

    let requester = state.requester_email.to_lowercase();
    let signed_by_requester = state
        .signatures
        .iter()
        .any(|sig| sig.email.to_lowercase() == requester && sig.is_signed());
    // Vacuously true when the requester is the only signer.
    let signed_by_others = state
        .signatures
        .iter()
        .filter(|sig| sig.email.to_lowercase() != requester)
        .all(|sig| sig.is_signed());

    if !signed_by_requester && signed_by_others {
        DocumentStatus::AwaitingMySignature
    } else {
        DocumentStatus::OutForSignature
    }
}
