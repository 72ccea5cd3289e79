//! JSON endpoints

use super::{blocking, ListingParams, WebError};
use crate::application::{ListingQuery, NewsService, ReportService};
use crate::application::reports::ProgressPage;
use crate::domain::{NewsItem, Summary};
use crate::web::state::SharedState;
use axum::extract::{Query, State};
use axum::Json;

pub async fn api_summary(State(state): State<SharedState>) -> Result<Json<Summary>, WebError> {
    let summary = blocking(&state, |s| ReportService::new(s.repository.clone()).summary()).await?;
    Ok(Json(summary))
}

/// The recap table page as JSON, honoring `q`, `page` and `size`
pub async fn api_progress(
    State(state): State<SharedState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProgressPage>, WebError> {
    let query = ListingQuery::from(params);
    let page = blocking(&state, move |s| {
        ReportService::new(s.repository.clone()).recap(&query)
    })
    .await?;
    Ok(Json(page))
}

pub async fn api_news(State(state): State<SharedState>) -> Result<Json<Vec<NewsItem>>, WebError> {
    let news = blocking(&state, |s| NewsService::new(s.repository.clone()).list()).await?;
    Ok(Json(news))
}
