//! Report signature settings use case

use crate::application::auth::require_admin;
use crate::application::commit;
use crate::domain::settings::SETTING_KEYS;
use crate::domain::{SystemSettings, Update};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};

pub struct SettingsService {
    repository: FileSystemRepository,
}

impl SettingsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        SettingsService { repository }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let settings = self.list()?;
        settings
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| unknown_key(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        require_admin(&self.repository)?;
        let mut settings = self.list()?;

        match key {
            "pejabat_nama" => settings.pejabat_nama = value.trim().to_string(),
            "pejabat_nip" => settings.pejabat_nip = value.trim().to_string(),
            "pejabat_jabatan" => settings.pejabat_jabatan = value.trim().to_string(),
            "ta" => {
                return Err(MonitorError::Config(
                    "Cannot modify 'ta' setting (read-only, fixed at init)".to_string(),
                ))
            }
            _ => return Err(unknown_key(key)),
        }

        commit(&self.repository, Update::UpdateSettings(settings))?;
        Ok(())
    }

    pub fn list(&self) -> Result<SystemSettings> {
        Ok(self.repository.load_data()?.settings)
    }
}

fn unknown_key(key: &str) -> MonitorError {
    MonitorError::Config(format!(
        "Unknown setting: '{}'. Valid keys are: {}",
        key,
        SETTING_KEYS.join(", ")
    ))
}
