mod memory;
mod traits;

pub use memory::MemoryStorage;
pub use traits::{SignedUpdate, Storage};
