pub mod broadcast;
pub mod flow;
pub mod hash_ledger;
pub mod reconciler;
pub mod status;
pub mod verify;

pub use flow::ServiceFlow;
pub use reconciler::SignRequest;
