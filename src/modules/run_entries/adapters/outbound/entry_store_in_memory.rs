// In memory implementation of the EntryStore port.
//
// Purpose
// - Support service and HTTP tests, and local runs with `DATABASE_URL=memory`.

use crate::modules::run_entries::core::entry::TimeEntry;
use crate::modules::run_entries::core::ports::{EntryStore, SortOrder, StoreError, sort_entries};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<String, TimeEntry>>,
    is_offline: bool,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Entry store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn find_all(&self, order: SortOrder) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let mut items: Vec<TimeEntry> = self.entries.read().await.values().cloned().collect();
        sort_entries(&mut items, order);
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn insert(&self, entry: TimeEntry) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        if guard.contains_key(&entry.id) {
            return Err(StoreError::Backend(format!("duplicate id {}", entry.id)));
        }
        guard.insert(entry.id.clone(), entry);
        Ok(())
    }

    async fn replace(&self, entry: TimeEntry) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        match guard.get_mut(&entry.id) {
            Some(slot) => {
                *slot = entry;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.entries.write().await.remove(id).is_some())
    }
}
