pub mod ledger;
pub mod logging;
pub mod provider;
pub mod storage;
