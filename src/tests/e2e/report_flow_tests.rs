use crate::modules::run_entries::adapters::outbound::entry_store_sqlite::SqliteEntryStore;
use crate::modules::run_entries::adapters::outbound::pdf_report::{
    DrawOp, PdfReportRenderer, layout_monthly,
};
use crate::modules::run_entries::core::ports::EntryStore;
use crate::modules::run_entries::use_cases::download_report::handler::ReportAggregator;
use crate::modules::run_entries::use_cases::download_report::renderer_port::ReportRenderer;
use crate::modules::run_entries::use_cases::manage_entries::handler::EntryService;
use crate::tests::fixtures::entries::{EntryInputBuilder, TimeEntryBuilder};
use std::sync::Arc;

fn texts(pages: &[Vec<DrawOp>]) -> Vec<String> {
    pages
        .iter()
        .flatten()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.clone()),
            DrawOp::Rule { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn logs_runs_and_reports_them_by_month() {
    let store = Arc::new(SqliteEntryStore::open_in_memory().unwrap());
    let service = EntryService::new(store.clone());
    let aggregator = ReportAggregator::new(store.clone());

    service
        .create(
            EntryInputBuilder::new()
                .date(Some("2025-01-05"))
                .readings(100, 0, 101, 30)
                .build(),
        )
        .await
        .unwrap();
    service
        .create(
            EntryInputBuilder::new()
                .date(Some("2025-01-06"))
                .without_readings()
                .closed(true)
                .build(),
        )
        .await
        .unwrap();
    let february = service
        .create(
            EntryInputBuilder::new()
                .date(Some("2025-02-01"))
                .readings(200, 0, 200, 45)
                .build(),
        )
        .await
        .unwrap();
    service
        .update(
            &february.id,
            EntryInputBuilder::new()
                .date(Some("2025-02-01"))
                .readings(200, 0, 201, 0)
                .build(),
        )
        .await
        .unwrap();

    // Written by an older schema version and never touched since.
    store
        .insert(
            TimeEntryBuilder::new()
                .id("legacy-clock")
                .date("2025-02-03")
                .legacy_clock("08:00", "08:30")
                .build(),
        )
        .await
        .unwrap();

    let report = aggregator.generate().await.unwrap();

    assert_eq!(report.skipped_entries, 0);
    assert_eq!(report.months.len(), 2);
    assert_eq!(report.months[0].label, "January 2025");
    assert_eq!(report.months[0].total_minutes, 90);
    assert_eq!(report.months[1].label, "February 2025");
    assert_eq!(report.months[1].total_minutes, 90);
    assert_eq!(report.summary.total_minutes, 180);
    assert_eq!(report.summary.day_count, 3);
    assert_eq!(report.summary.average_hours_per_day, "1.00");

    let lines = texts(&layout_monthly(&report));
    assert!(lines.contains(&"January 2025 \u{2014} Total: 1h 30m (90 min)".to_string()));
    assert!(lines.contains(&"Generator Closed (No Run)".to_string()));
    assert!(lines.contains(&"08:00".to_string()));
    assert!(lines.contains(&"Total Hours Worked: 3h 0m (180 min)".to_string()));
    assert!(lines.contains(&"Total Working Days (valid readings): 3".to_string()));
    assert!(lines.contains(&"Average Per Day: 1.00 hrs/day".to_string()));

    let bytes = PdfReportRenderer.render_monthly(&report).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn leaves_undated_documents_out_of_the_monthly_report() {
    let store = Arc::new(SqliteEntryStore::open_in_memory().unwrap());
    store
        .insert(TimeEntryBuilder::new().id("ok").date("2025-03-09").build())
        .await
        .unwrap();
    store
        .insert(TimeEntryBuilder::new().id("undated").date("").build())
        .await
        .unwrap();

    let aggregator = ReportAggregator::new(store);
    let monthly = aggregator.generate().await.unwrap();
    let flat = aggregator.generate_flat().await.unwrap();

    assert_eq!(monthly.skipped_entries, 1);
    assert_eq!(monthly.summary.day_count, 1);
    assert_eq!(flat.rows.len(), 2);
    assert_eq!(flat.summary.day_count, 2);
}
