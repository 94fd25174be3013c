// Ports the run entry core needs from the outside world.
//
// Adapters in `adapters::outbound` implement them: an in-memory store for
// tests and local runs, and a SQLite document store for deployments.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::run_entries::core::entry::TimeEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed document: {0}")]
    Document(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest date first.
    Ascending,
    /// Newest date first.
    Descending,
}

/// Entries are ordered by their `date` string, ties by `created_at`, both in
/// the requested direction.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn find_all(&self, order: SortOrder) -> Result<Vec<TimeEntry>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TimeEntry>, StoreError>;
    async fn insert(&self, entry: TimeEntry) -> Result<(), StoreError>;
    /// Returns `false` when no entry with that id exists.
    async fn replace(&self, entry: TimeEntry) -> Result<bool, StoreError>;
    /// Returns `false` when no entry with that id exists.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

pub(crate) fn sort_entries(entries: &mut [TimeEntry], order: SortOrder) {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    if order == SortOrder::Descending {
        entries.reverse();
    }
}
