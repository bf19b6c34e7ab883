//! Mesh record synchronization
//!
//! Records authored on disconnected peers arrive in batches. The merge policy
//! is append-only and first-writer-wins; storage performs the guarded insert.

pub mod merge;

pub use merge::{merge_records, ExternalRecord, SyncRecord};
