//! Public announcements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Characters of the excerpt shown in the TV ticker
pub const TICKER_EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
}

impl NewsItem {
    /// New item with a generated id
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, date: NaiveDate) -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        NewsItem {
            id: id[..12].to_string(),
            title: title.into(),
            excerpt: excerpt.into(),
            date,
        }
    }

    /// `TITLE: first 100 characters of the excerpt...`
    pub fn ticker_line(&self) -> String {
        let excerpt: String = self.excerpt.chars().take(TICKER_EXCERPT_CHARS).collect();
        format!("{}: {}...", self.title.to_uppercase(), excerpt)
    }
}
