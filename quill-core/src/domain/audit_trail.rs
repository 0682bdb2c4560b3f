use crate::domain::model::{HistoryEntry, HistoryEventType};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Label prefixes opening a timeline event in the provider's audit trail.
const LABELS: [(&str, HistoryEventType); 4] = [
    ("Sent for signature", HistoryEventType::Sent),
    ("Viewed by", HistoryEventType::Viewed),
    ("Signed by", HistoryEventType::Signed),
    ("The document has been completed", HistoryEventType::Completed),
];

/// Tokens preceding the last "Sent for signature" label that still belong to
/// the timeline (the date/time pair is rendered before the label).
const BOUNDARY_LOOKBACK: usize = 2;

const TIMESTAMP_FORMAT: &str = "%m / %d / %Y %H:%M:%S";

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex"))
}

fn ip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("ip regex"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2} / \d{1,2} / \d{4}$").expect("date regex"))
}

struct OpenEvent {
    kind: HistoryEventType,
    description: Vec<String>,
    email: Option<String>,
    ip: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl OpenEvent {
    fn start(kind: HistoryEventType, label_token: &str) -> Self {
        let mut event =
            Self { kind, description: vec![label_token.to_string()], email: None, ip: None, timestamp: None };
        event.scan_email(label_token);
        event
    }

    /// The provider consistently renders the relevant actor's email last, so
    /// every new match replaces the previous one.
    fn scan_email(&mut self, token: &str) {
        if let Some(found) = email_re().find_iter(token).last() {
            self.email = Some(found.as_str().to_string());
        }
    }

    fn close(self) -> HistoryEntry {
        HistoryEntry {
            kind: self.kind,
            timestamp: self.timestamp,
            ip: self.ip,
            email: self.email,
            description: self.description.join(" ").trim().to_string(),
            tx_hash: None,
        }
    }
}

fn label_match(token: &str) -> Option<HistoryEventType> {
    LABELS.iter().find(|(prefix, _)| token.starts_with(prefix)).map(|(_, kind)| *kind)
}

/// Parses the combined "MM / DD / YYYY" + "HH:mm:ss" token pair as UTC.
fn parse_timestamp(date_token: &str, time_token: Option<&str>) -> Option<DateTime<Utc>> {
    let time_token = time_token?;
    let combined = format!("{date_token} {time_token}");
    NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Converts the text tokens of a rendered audit-trail artifact into ordered
/// timeline events.
///
/// The stream opens with header and legal boilerplate; everything before the
/// last "Sent for signature" label (minus the lookback for its preceding
/// date/time pair) is discarded. Scanning is exclusive: while an event is
/// being accumulated, label prefixes inside its free text never restart
/// detection. An event closes on a date/time pair, after an IP that is not
/// followed by a date, or at end of input. Malformed timestamps and missing
/// IPs degrade to absent fields.
pub fn parse_audit_trail(tokens: &[String]) -> Vec<HistoryEntry> {
    let Some(last_sent) = tokens.iter().rposition(|tok| tok.starts_with(LABELS[0].0)) else {
        return Vec::new();
    };
    let start = last_sent.saturating_sub(BOUNDARY_LOOKBACK);
    let tokens = &tokens[start..];

    let mut events = Vec::new();
    let mut current: Option<OpenEvent> = None;
    let mut awaiting_date_after_ip = false;
    let mut idx = 0;

    while idx < tokens.len() {
        let token = tokens[idx].trim();

        let Some(event) = current.as_mut() else {
            if let Some(kind) = label_match(token) {
                current = Some(OpenEvent::start(kind, token));
            }
            idx += 1;
            continue;
        };

        if date_re().is_match(token) {
            event.timestamp = parse_timestamp(token, tokens.get(idx + 1).map(|t| t.trim()));
            // The time-of-day token was consumed together with the date.
            idx += if event.timestamp.is_some() { 2 } else { 1 };
            if let Some(closed) = current.take() {
                events.push(closed.close());
            }
            awaiting_date_after_ip = false;
            continue;
        }

        if awaiting_date_after_ip {
            // Only a document date/time may extend an event past its IP;
            // anything else closes it and is rescanned as a fresh label.
            if let Some(closed) = current.take() {
                events.push(closed.close());
            }
            awaiting_date_after_ip = false;
            continue;
        }

        if ip_re().is_match(token) {
            event.ip = Some(token.to_string());
            awaiting_date_after_ip = true;
            idx += 1;
            continue;
        }

        event.description.push(token.to_string());
        event.scan_email(token);
        idx += 1;
    }

    if let Some(event) = current.take() {
        events.push(event.close());
    }

    events
}
