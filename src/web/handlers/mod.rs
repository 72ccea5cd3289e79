//! Request handlers and their shared error type.

pub mod api;
pub mod pages;

use crate::application::ListingQuery;
use crate::error::MonitorError;
use crate::web::state::SharedState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::Monitor(MonitorError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// `?q=&page=&size=` on the table pages
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl From<ListingParams> for ListingQuery {
    fn from(params: ListingParams) -> Self {
        ListingQuery {
            search: params.q.unwrap_or_default(),
            page: params.page.unwrap_or(1),
            page_size: params.size,
        }
    }
}

/// Run a blocking load against the state on the blocking pool
pub(crate) async fn blocking<T, F>(state: &SharedState, f: F) -> Result<T, WebError>
where
    T: Send + 'static,
    F: FnOnce(&crate::web::state::AppState) -> crate::error::Result<T> + Send + 'static,
{
    let state = state.clone();
    Ok(tokio::task::spawn_blocking(move || f(&state)).await??)
}
