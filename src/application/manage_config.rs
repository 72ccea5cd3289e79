//! Config management use case

use crate::error::{MonitorError, Result};
use crate::infrastructure::{Config, FileSystemRepository, MonitorRepository};

/// Keys accepted by `sirup config`
pub const CONFIG_KEYS: [&str; 10] = [
    "region",
    "city",
    "timezone_label",
    "utc_offset_hours",
    "page_size",
    "listen_addr",
    "contact.address",
    "contact.phone",
    "contact.email",
    "created",
];

/// Service for managing local configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "region" => Ok(config.region),
            "city" => Ok(config.city),
            "timezone_label" => Ok(config.timezone_label),
            "utc_offset_hours" => Ok(config.utc_offset_hours.to_string()),
            "page_size" => Ok(config.page_size.to_string()),
            "listen_addr" => Ok(config.listen_addr),
            "contact.address" => Ok(config.contact.address),
            "contact.phone" => Ok(config.contact.phone),
            "contact.email" => Ok(config.contact.email),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "region" => config.region = value.to_string(),
            "city" => config.city = value.to_string(),
            "timezone_label" => config.timezone_label = value.to_string(),
            "utc_offset_hours" => {
                let hours: i32 = value.parse().map_err(|_| {
                    MonitorError::Config(format!("utc_offset_hours must be an integer, got '{}'", value))
                })?;
                if !(-12..=14).contains(&hours) {
                    return Err(MonitorError::Config(
                        "utc_offset_hours must be between -12 and 14".to_string(),
                    ));
                }
                config.utc_offset_hours = hours;
            }
            "page_size" => {
                config.page_size = match value.parse::<usize>() {
                    Ok(size) if size > 0 => size,
                    _ => {
                        return Err(MonitorError::Config(format!(
                            "page_size must be a positive integer, got '{}'",
                            value
                        )))
                    }
                };
            }
            "listen_addr" => {
                value.parse::<std::net::SocketAddr>().map_err(|_| {
                    MonitorError::Config(format!("listen_addr must be HOST:PORT, got '{}'", value))
                })?;
                config.listen_addr = value.to_string();
            }
            "contact.address" => config.contact.address = value.to_string(),
            "contact.phone" => config.contact.phone = value.to_string(),
            "contact.email" => config.contact.email = value.to_string(),
            "created" => {
                return Err(MonitorError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> MonitorError {
    MonitorError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
