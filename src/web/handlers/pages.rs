//! Public HTML pages

use super::{blocking, ListingParams, WebError};
use crate::application::{ListingQuery, NewsService, ReportService};
use crate::infrastructure::MonitorRepository;
use crate::web::state::SharedState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use minijinja::context;

/// Seconds between reloads of the TV monitor
pub const TV_REFRESH_SECONDS: u32 = 60;

pub async fn recap_page(
    State(state): State<SharedState>,
    Query(params): Query<ListingParams>,
) -> Result<Html<String>, WebError> {
    let query = ListingQuery::from(params);
    let html = blocking(&state, move |s| {
        let config = s.repository.load_config()?;
        let reports = ReportService::new(s.repository.clone());
        let summary = reports.summary()?;
        let page = reports.recap(&query)?;
        let ta = page.ta.clone();
        s.renderer.render(
            "recap.html",
            context! { config, ta, active => "rekap", summary, page },
        )
    })
    .await?;
    Ok(Html(html))
}

pub async fn report_page(
    State(state): State<SharedState>,
    Query(params): Query<ListingParams>,
) -> Result<Html<String>, WebError> {
    let query = ListingQuery::from(params);
    let html = blocking(&state, move |s| {
        let config = s.repository.load_config()?;
        let report = ReportService::new(s.repository.clone()).report(&query)?;
        let ta = report.page.ta.clone();
        s.renderer.render(
            "report.html",
            context! { config, ta, active => "laporan", report },
        )
    })
    .await?;
    Ok(Html(html))
}

pub async fn tv_page(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let html = blocking(&state, |s| {
        let tv = ReportService::new(s.repository.clone()).tv()?;
        s.renderer.render(
            "tv.html",
            context! { tv, refresh_seconds => TV_REFRESH_SECONDS },
        )
    })
    .await?;
    Ok(Html(html))
}

pub async fn news_page(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let html = blocking(&state, |s| {
        let config = s.repository.load_config()?;
        let data = s.repository.load_data()?;
        s.renderer.render(
            "news.html",
            context! {
                config,
                ta => data.settings.ta,
                active => "berita",
                news => data.news,
            },
        )
    })
    .await?;
    Ok(Html(html))
}

pub async fn news_detail_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let html = blocking(&state, move |s| {
        let config = s.repository.load_config()?;
        let item = NewsService::new(s.repository.clone()).show(&id)?;
        let ta = s.repository.load_data()?.settings.ta;
        s.renderer.render(
            "news_detail.html",
            context! { config, ta, active => "berita", item },
        )
    })
    .await?;
    Ok(Html(html))
}

pub async fn contact_page(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let html = blocking(&state, |s| {
        let config = s.repository.load_config()?;
        let ta = s.repository.load_data()?.settings.ta;
        s.renderer.render(
            "contact.html",
            context! { config, ta, active => "kontak" },
        )
    })
    .await?;
    Ok(Html(html))
}
