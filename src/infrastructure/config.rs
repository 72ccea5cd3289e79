//! Configuration management

use crate::error::{MonitorError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the data directory inside the root
pub const DATA_DIR: &str = ".sirup";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for Contact {
    fn default() -> Self {
        Contact {
            address: "Kantor Gubernur NTB, Biro Pengadaan Barang dan Jasa, Jl. Pejanggik No. 12, Mataram"
                .to_string(),
            phone: "(0370) 6211234".to_string(),
            email: "biropbj@ntbprov.go.id".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Province name used in page titles
    pub region: String,
    /// Place name in the report signature line
    pub city: String,
    pub timezone_label: String,
    pub utc_offset_hours: i32,
    pub page_size: usize,
    pub listen_addr: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub contact: Contact,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: "NTB".to_string(),
            city: "Mataram".to_string(),
            timezone_label: "WITA".to_string(),
            utc_offset_hours: 8,
            page_size: 10,
            listen_addr: "127.0.0.1:8080".to_string(),
            created: Utc::now(),
            contact: Contact::default(),
        }
    }
}

impl Config {
    /// Load config from .sirup/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DATA_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MonitorError::NotInitialized(path.to_path_buf())
            } else {
                MonitorError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| MonitorError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .sirup/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let data_dir = path.join(DATA_DIR);
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir(&data_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| MonitorError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Offset of the local display timezone; falls back to UTC when out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or(Utc.fix())
    }

    /// `at` expressed in the local display timezone
    pub fn local_time(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset()).naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timezone_label, "WITA");
        assert!(!config.contact.email.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            city: "Bima".to_string(),
            ..Config::default()
        };

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".sirup/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            MonitorError::NotInitialized(_) => {}
            other => panic!("Expected NotInitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_without_contact_section() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(DATA_DIR)).unwrap();
        fs::write(
            temp.path().join(".sirup/config.toml"),
            "region = \"NTB\"\ncity = \"Mataram\"\ntimezone_label = \"WITA\"\n\
             utc_offset_hours = 8\npage_size = 25\nlisten_addr = \"0.0.0.0:80\"\n\
             created = \"2026-01-02T00:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.page_size, 25);
        assert_eq!(loaded.contact, Contact::default());
    }

    #[test]
    fn test_local_time_applies_offset() {
        let config = Config::default();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap();
        let local = config.local_time(at);
        assert_eq!(local.to_string(), "2026-10-20 07:30:00");
    }
}
