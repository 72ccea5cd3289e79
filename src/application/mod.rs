//! Application layer - Use cases and orchestration

pub mod auth;
pub mod backup;
pub mod init;
pub mod manage_config;
pub mod manage_news;
pub mod manage_opd;
pub mod manage_settings;
pub mod manage_users;
pub mod record_progress;
pub mod reports;

pub use auth::AuthService;
pub use backup::BackupService;
pub use manage_config::ConfigService;
pub use manage_news::{NewsChanges, NewsService};
pub use manage_opd::OpdService;
pub use manage_settings::SettingsService;
pub use manage_users::{UserChanges, UserService};
pub use record_progress::ProgressService;
pub use reports::{ListingQuery, ReportService};

use crate::domain::{AppData, Update};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, MonitorRepository};
use chrono::Utc;

/// Load the snapshot, apply `update` and persist the collections it changed.
pub(crate) fn commit(repository: &FileSystemRepository, update: Update) -> Result<AppData> {
    let mut data = repository.load_data()?;
    let payload = data.apply(update, Utc::now())?;
    repository.sync(payload)?;
    Ok(data)
}
