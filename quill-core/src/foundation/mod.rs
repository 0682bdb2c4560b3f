pub mod constants;
pub mod error;
pub mod types;
pub mod util;

pub use error::{ErrorCode, ErrorContext, QuillError, Result};
pub use types::{ContentHash, DocumentUid, SignatureUid, TxHash};
pub use util::{from_secs, now_secs, now_utc, sha256_hex};
