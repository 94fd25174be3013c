use std::sync::Arc;
use thiserror::Error;

use crate::modules::run_entries::core::ports::{EntryStore, SortOrder, StoreError};
use crate::modules::run_entries::core::report::{
    FlatReport, ReportModel, build_flat_report, build_monthly_report,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads a snapshot of all entries, oldest first, and aggregates it.
pub struct ReportAggregator {
    store: Arc<dyn EntryStore>,
}

impl ReportAggregator {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    pub async fn generate(&self) -> Result<ReportModel, ReportError> {
        let entries = self.store.find_all(SortOrder::Ascending).await?;
        let report = build_monthly_report(&entries);
        if report.skipped_entries > 0 {
            tracing::warn!(
                skipped = report.skipped_entries,
                "entries without a usable year and month left out of the monthly report"
            );
        }
        tracing::debug!(
            months = report.months.len(),
            total_minutes = report.summary.total_minutes,
            days = report.summary.day_count,
            "monthly report generated"
        );
        Ok(report)
    }

    pub async fn generate_flat(&self) -> Result<FlatReport, ReportError> {
        let entries = self.store.find_all(SortOrder::Ascending).await?;
        Ok(build_flat_report(&entries))
    }
}

#[cfg(test)]
mod report_aggregator_tests {
    use super::*;
    use crate::modules::run_entries::adapters::outbound::entry_store_in_memory::InMemoryEntryStore;
    use crate::modules::run_entries::core::entry::TimeEntry;
    use crate::modules::run_entries::use_cases::manage_entries::handler::EntryService;
    use crate::tests::fixtures::entries::{EntryInputBuilder, TimeEntryBuilder};
    use rstest::rstest;

    async fn aggregator_with(entries: Vec<TimeEntry>) -> ReportAggregator {
        let store = InMemoryEntryStore::new();
        for entry in entries {
            store.insert(entry).await.expect("insert failed");
        }
        ReportAggregator::new(Arc::new(store))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_group_stored_entries_oldest_month_first() {
        let aggregator = aggregator_with(vec![
            TimeEntryBuilder::new().id("feb").date("2025-02-01").build(),
            TimeEntryBuilder::new().id("jan-late").date("2025-01-20").build(),
            TimeEntryBuilder::new().id("jan-early").date("2025-01-10").build(),
        ])
        .await;

        let report = aggregator.generate().await.expect("generate failed");
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].key, "2025-01");
        let january: Vec<&str> = report.months[0]
            .rows
            .iter()
            .map(|r| r.entry_id.as_str())
            .collect();
        assert_eq!(january, vec!["jan-early", "jan-late"]);
        assert_eq!(report.months[1].key, "2025-02");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_every_entry_in_the_flat_report() {
        let aggregator = aggregator_with(vec![
            TimeEntryBuilder::new().id("a").date("2025-01-10").build(),
            TimeEntryBuilder::new().id("b").date("garbage").build(),
        ])
        .await;

        let report = aggregator.generate_flat().await.unwrap();
        assert_eq!(report.rows.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_repair_rows_without_touching_the_stored_document() {
        let store = Arc::new(InMemoryEntryStore::new());
        let legacy = TimeEntryBuilder::new()
            .id("legacy")
            .readings(500, 10, 502, 40)
            .without_derived_fields()
            .build();
        store.insert(legacy.clone()).await.unwrap();

        let report = ReportAggregator::new(store.clone()).generate().await.unwrap();
        assert_eq!(report.summary.total_minutes, 150);

        let stored = store.find_by_id("legacy").await.unwrap().unwrap();
        assert_eq!(stored, legacy);
        assert_eq!(stored.diff_hours, None);
        assert_eq!(stored.diff_minutes, None);
        assert_eq!(stored.total_minutes, None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_still_report_when_created_runs_exceed_the_total_range() {
        let store = Arc::new(InMemoryEntryStore::new());
        let service = EntryService::new(store.clone());
        for date in ["2025-05-01", "2025-05-02"] {
            service
                .create(
                    EntryInputBuilder::new()
                        .date(Some(date))
                        .readings(0, 0, 100_000_000_000_000_000, 0)
                        .build(),
                )
                .await
                .unwrap();
        }

        let report = ReportAggregator::new(store).generate().await.unwrap();
        assert_eq!(report.months[0].total_minutes, i64::MAX);
        assert_eq!(report.summary.total_minutes, i64::MAX);
        assert_eq!(report.summary.day_count, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_store_is_offline() {
        let mut store = InMemoryEntryStore::new();
        store.toggle_offline();
        let aggregator = ReportAggregator::new(Arc::new(store));
        assert!(matches!(
            aggregator.generate().await,
            Err(ReportError::Store(StoreError::Backend(_)))
        ));
    }
}
