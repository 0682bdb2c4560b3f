mod broadcast;
mod hash_ledger;
mod status_resolution;
mod storage;
mod verify;
