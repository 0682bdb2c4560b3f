pub mod encoding;
pub mod time;

pub use encoding::sha256_hex;
pub use time::{from_secs, now_secs, now_utc};
