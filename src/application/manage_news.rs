//! News management use case

use crate::application::auth::require_user;
use crate::application::commit;
use crate::domain::{NewsItem, Update};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};
use chrono::NaiveDate;

/// Fields of a news edit; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct NewsChanges {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<NaiveDate>,
}

pub struct NewsService {
    repository: FileSystemRepository,
}

impl NewsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        NewsService { repository }
    }

    /// Newest first, as stored
    pub fn list(&self) -> Result<Vec<NewsItem>> {
        Ok(self.repository.load_data()?.news)
    }

    pub fn show(&self, id: &str) -> Result<NewsItem> {
        self.repository
            .load_data()?
            .news_item(id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("News", id))
    }

    pub fn add(&self, title: &str, excerpt: &str, date: NaiveDate) -> Result<NewsItem> {
        require_user(&self.repository)?;
        let item = NewsItem::new(title.trim(), excerpt.trim(), date);
        commit(&self.repository, Update::UpsertNews(item.clone()))?;
        tracing::info!(news_id = %item.id, "added news");
        Ok(item)
    }

    pub fn update(&self, id: &str, changes: NewsChanges) -> Result<NewsItem> {
        require_user(&self.repository)?;
        let mut item = self.show(id)?;
        if let Some(title) = changes.title {
            item.title = title.trim().to_string();
        }
        if let Some(excerpt) = changes.excerpt {
            item.excerpt = excerpt.trim().to_string();
        }
        if let Some(date) = changes.date {
            item.date = date;
        }
        commit(&self.repository, Update::UpsertNews(item.clone()))?;
        Ok(item)
    }

    pub fn remove(&self, id: &str) -> Result<NewsItem> {
        require_user(&self.repository)?;
        let item = self.show(id)?;
        commit(&self.repository, Update::RemoveNews(id.to_string()))?;
        Ok(item)
    }
}
