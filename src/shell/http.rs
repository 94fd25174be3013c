use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::run_entries::use_cases::download_report::inbound::http as report_http;
use crate::modules::run_entries::use_cases::manage_entries::inbound::http as entries_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/entries", get(entries_http::list).post(entries_http::create))
        .route("/entries/download/pdf", get(report_http::handle))
        .route(
            "/entries/{id}",
            put(entries_http::update).delete(entries_http::delete),
        )
        .with_state(state)
}
