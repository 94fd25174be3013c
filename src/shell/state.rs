use crate::modules::run_entries::adapters::outbound::entry_store_in_memory::InMemoryEntryStore;
use crate::modules::run_entries::adapters::outbound::entry_store_sqlite::SqliteEntryStore;
use crate::modules::run_entries::adapters::outbound::pdf_report::PdfReportRenderer;
use crate::modules::run_entries::core::ports::{EntryStore, StoreError};
use crate::modules::run_entries::use_cases::download_report::handler::ReportAggregator;
use crate::modules::run_entries::use_cases::download_report::renderer_port::ReportRenderer;
use crate::modules::run_entries::use_cases::manage_entries::handler::EntryService;
use crate::shell::config::StorageConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<EntryService>,
    pub reports: Arc<ReportAggregator>,
    pub renderer: Arc<dyn ReportRenderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self {
            entries: Arc::new(EntryService::new(store.clone())),
            reports: Arc::new(ReportAggregator::new(store)),
            renderer,
        }
    }

    /// Wires the PDF renderer.
    pub fn with_store(store: Arc<dyn EntryStore>) -> Self {
        Self::new(store, Arc::new(PdfReportRenderer))
    }
}

/// Opens the configured store. Callers treat failure as fatal at startup.
pub fn connect_store(storage: &StorageConfig) -> Result<Arc<dyn EntryStore>, StoreError> {
    let store: Arc<dyn EntryStore> = match storage {
        StorageConfig::InMemory => Arc::new(InMemoryEntryStore::new()),
        StorageConfig::Sqlite(path) => Arc::new(SqliteEntryStore::open(path)?),
    };
    Ok(store)
}
