//! Axum router: maps URL paths to handlers.

use crate::web::handlers::{
    api::{api_news, api_progress, api_summary},
    pages::{contact_page, news_detail_page, news_page, recap_page, report_page, tv_page},
};
use crate::web::state::{AppState, SharedState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full router over `state`.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/", get(recap_page))
        .route("/tv", get(tv_page))
        .route("/berita", get(news_page))
        .route("/berita/{id}", get(news_detail_page))
        .route("/kontak", get(contact_page))
        .route("/laporan", get(report_page))
        // JSON
        .route("/api/summary", get(api_summary))
        .route("/api/progress", get(api_progress))
        .route("/api/news", get(api_news))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
