use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::run_entries::core::entry::TimeEntry;
use crate::modules::run_entries::core::ports::{EntryStore, SortOrder, StoreError};
use crate::modules::run_entries::use_cases::manage_entries::command::EntryInput;
use crate::modules::run_entries::use_cases::manage_entries::decide::{DecideError, decide_entry};

#[derive(Debug, Error)]
pub enum EntryServiceError {
    #[error(transparent)]
    Validation(#[from] DecideError),

    #[error("entry {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Newest date first.
    pub async fn list(&self) -> Result<Vec<TimeEntry>, EntryServiceError> {
        Ok(self.store.find_all(SortOrder::Descending).await?)
    }

    pub async fn create(&self, input: EntryInput) -> Result<TimeEntry, EntryServiceError> {
        let fields = decide_entry(input)?;
        let entry = TimeEntry::new(Uuid::now_v7().to_string(), fields, now_millis());
        self.store.insert(entry.clone()).await?;
        tracing::info!(entry_id = %entry.id, date = %entry.date, closed = entry.closed, "entry created");
        Ok(entry)
    }

    pub async fn update(
        &self,
        id: &str,
        input: EntryInput,
    ) -> Result<TimeEntry, EntryServiceError> {
        let mut entry = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| EntryServiceError::NotFound(id.to_string()))?;
        let fields = decide_entry(input)?;
        entry.apply(fields, now_millis());
        if !self.store.replace(entry.clone()).await? {
            return Err(EntryServiceError::NotFound(id.to_string()));
        }
        tracing::info!(entry_id = %entry.id, date = %entry.date, closed = entry.closed, "entry updated");
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> Result<(), EntryServiceError> {
        if !self.store.delete(id).await? {
            return Err(EntryServiceError::NotFound(id.to_string()));
        }
        tracing::info!(entry_id = %id, "entry deleted");
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
