use crate::domain::model::{HistoryEntry, HistoryEventType, SignatureDetails};

/// Merges provider audit-trail events with locally recorded on-chain
/// signings into one chronological timeline.
///
/// `signatures` arrive ordered by signer, `parsed` ordered by time. A cursor
/// walks `parsed`: before each signature, every pending parsed event with a
/// timestamp earlier than that signature's signing time is emitted (entries
/// without a timestamp are emitted eagerly). Completed signatures then get a
/// synthetic SignedOnChain entry. Parsed events left after the last
/// signature are dropped, matching the behavior of the reference service.
pub fn merge_timeline(signatures: &[SignatureDetails], parsed: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut merged = Vec::with_capacity(parsed.len() + signatures.len());
    let mut cursor = parsed.into_iter().peekable();

    for signature in signatures {
        while let Some(next) = cursor.peek() {
            let emit = match (next.timestamp, signature.signed_at) {
                (None, _) => true,
                (Some(ts), Some(signed_at)) => ts < signed_at,
                (Some(_), None) => false,
            };
            if !emit {
                break;
            }
            if let Some(entry) = cursor.next() {
                merged.push(entry);
            }
        }

        if !signature.completed {
            continue;
        }

        merged.push(signed_on_chain_entry(signature));
    }

    merged
}

fn signed_on_chain_entry(signature: &SignatureDetails) -> HistoryEntry {
    let description = match &signature.auth_email {
        Some(auth) if !auth.eq_ignore_ascii_case(&signature.recipient_email) => format!(
            "{} signed on chain with email {} (sent to {})",
            signature.name, auth, signature.recipient_email
        ),
        _ => format!("{} signed on chain with email {}", signature.name, signature.recipient_email),
    };

    HistoryEntry {
        kind: HistoryEventType::SignedOnChain,
        timestamp: signature.signed_at,
        ip: signature.ip.clone(),
        email: Some(signature.auth_email.clone().unwrap_or_else(|| signature.recipient_email.clone())),
        description,
        tx_hash: signature.tx_hash.clone(),
    }
}
