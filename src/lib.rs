// modferry - keeps deployed game mod folders in sync with a versioned
// source cache.
//
// This is the library crate containing the sync engine; the binary crate
// (main.rs) is a thin command-line front end over it.

pub mod core;
pub mod models;
pub mod utils;

// Re-export the types a caller needs for a full sync run.
pub use crate::core::sync::{export_manifest, sync_in_place, sync_update_bundle};
pub use crate::models::config::SyncConfig;
pub use crate::models::decision::{SyncDecision, UpdateReason};
pub use crate::models::error::SyncError;
pub use crate::models::report::{SyncAction, SyncOutcome, SyncReport};
