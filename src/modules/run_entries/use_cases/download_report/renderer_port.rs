use thiserror::Error;

use crate::modules::run_entries::core::report::{FlatReport, ReportModel};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report rendering failed: {0}")]
    Failed(String),
}

/// Turns a report model into a downloadable document.
pub trait ReportRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn file_name(&self) -> &'static str;
    fn render_monthly(&self, report: &ReportModel) -> Result<Vec<u8>, RenderError>;
    fn render_flat(&self, report: &FlatReport) -> Result<Vec<u8>, RenderError>;
}
