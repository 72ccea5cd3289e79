//! Backup and restore of the full snapshot

use crate::application::auth::require_admin;
use crate::application::commit;
use crate::domain::{AppData, Update};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};
use std::fs;
use std::path::Path;

pub struct BackupService {
    repository: FileSystemRepository,
}

impl BackupService {
    pub fn new(repository: FileSystemRepository) -> Self {
        BackupService { repository }
    }

    /// Write every collection to `path` as pretty JSON
    pub fn export(&self, path: &Path) -> Result<AppData> {
        require_admin(&self.repository)?;
        let data = self.repository.load_data()?;
        fs::write(path, serde_json::to_string_pretty(&data)?)?;
        tracing::info!(file = %path.display(), "exported backup");
        Ok(data)
    }

    /// Replace the stored snapshot with the one in `path`
    pub fn restore(&self, path: &Path) -> Result<AppData> {
        require_admin(&self.repository)?;
        let contents = fs::read_to_string(path)?;
        let snapshot: AppData = serde_json::from_str(&contents)
            .map_err(|e| MonitorError::Invalid(format!("not a sirup backup: {}", e)))?;
        if snapshot.users.is_empty() || !snapshot.users.iter().any(|u| u.is_admin()) {
            return Err(MonitorError::Invalid(
                "backup has no admin user; refusing to lock everyone out".to_string(),
            ));
        }

        let data = commit(&self.repository, Update::Restore(snapshot))?;
        tracing::info!(file = %path.display(), opds = data.opds.len(), "restored backup");
        Ok(data)
    }
}
