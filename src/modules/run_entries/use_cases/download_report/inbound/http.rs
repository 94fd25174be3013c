use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;

use crate::modules::run_entries::use_cases::download_report::handler::ReportError;
use crate::modules::run_entries::use_cases::download_report::renderer_port::RenderError;
use crate::shell::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    #[default]
    Monthly,
    Flat,
}

#[derive(Deserialize)]
pub struct DownloadReportParams {
    pub layout: Option<ReportLayout>,
}

#[derive(Debug, Error)]
enum DownloadError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

async fn render(state: &AppState, layout: ReportLayout) -> Result<Vec<u8>, DownloadError> {
    let bytes = match layout {
        ReportLayout::Monthly => {
            let report = state.reports.generate().await?;
            state.renderer.render_monthly(&report)?
        }
        ReportLayout::Flat => {
            let report = state.reports.generate_flat().await?;
            state.renderer.render_flat(&report)?
        }
    };
    Ok(bytes)
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<DownloadReportParams>,
) -> Response {
    let layout = params.layout.unwrap_or_default();
    match render(&state, layout).await {
        Ok(bytes) => (
            [
                (
                    header::CONTENT_TYPE,
                    state.renderer.content_type().to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", state.renderer.file_name()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, ?layout, "report generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "PDF generation failed").into_response()
        }
    }
}
