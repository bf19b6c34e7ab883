//! Idempotent merge of peer-supplied records
//!
//! A record is selected for insertion only if its identifier is unknown
//! locally and has not already been selected earlier in the same batch.
//! Existing records are never updated or removed by a sync.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A record that can be merged by identifier
pub trait SyncRecord {
    type Id: Eq + Hash + Clone;

    fn sync_id(&self) -> Self::Id;
}

/// Incident report as carried between mesh peers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRecord {
    /// Identifier assigned by the authoring node
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    /// Owner of the report on the authoring node
    pub user_id: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_severity() -> String {
    "medium".to_string()
}

fn default_status() -> String {
    "pending".to_string()
}

impl SyncRecord for ExternalRecord {
    type Id = i64;

    fn sync_id(&self) -> i64 {
        self.id
    }
}

/// Select the records from `incoming` that should be inserted
///
/// Input order is preserved. The result is advisory: concurrent batches may
/// race, so the caller must insert under a uniqueness guard.
pub fn merge_records<R: SyncRecord>(
    existing_ids: &HashSet<R::Id>,
    incoming: impl IntoIterator<Item = R>,
) -> Vec<R> {
    let mut selected_ids: HashSet<R::Id> = HashSet::new();
    let mut selected = Vec::new();

    for record in incoming {
        let id = record.sync_id();
        if existing_ids.contains(&id) || selected_ids.contains(&id) {
            tracing::trace!("Skipping already known record");
            continue;
        }
        selected_ids.insert(id);
        selected.push(record);
    }

    selected
}
