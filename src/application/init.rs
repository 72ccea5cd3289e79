//! Initialize data directory use case

use crate::domain::{AppData, Role, SyncPayload, SystemSettings, User};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{Config, FileSystemRepository, MonitorRepository};
use std::fs;
use std::path::Path;

/// Password given to the first admin when none is supplied
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Clone)]
pub struct InitOptions {
    pub fiscal_year: String,
    pub admin_username: String,
    pub admin_password: Option<String>,
}

impl Default for InitOptions {
    fn default() -> Self {
        InitOptions {
            fiscal_year: "2026".to_string(),
            admin_username: "admin".to_string(),
            admin_password: None,
        }
    }
}

/// Initialize a new data directory at the specified path.
pub fn init(path: &Path, options: &InitOptions) -> Result<()> {
    let fiscal_year = options.fiscal_year.trim();
    if fiscal_year.len() != 4 || !fiscal_year.chars().all(|c| c.is_ascii_digit()) {
        return Err(MonitorError::Invalid(format!(
            "fiscal year must be four digits, got '{}'",
            options.fiscal_year
        )));
    }
    if options.admin_username.trim().is_empty() {
        return Err(MonitorError::Invalid("username is empty".to_string()));
    }

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::default())?;

    let password = options
        .admin_password
        .as_deref()
        .unwrap_or(DEFAULT_ADMIN_PASSWORD);
    let admin = User::new(
        options.admin_username.trim(),
        "Administrator",
        Role::Admin,
        password,
    );
    let data = AppData {
        users: vec![admin],
        settings: SystemSettings::for_fiscal_year(fiscal_year),
        ..Default::default()
    };
    repo.sync(SyncPayload::full(&data))?;
    tracing::info!(root = %path.display(), fiscal_year, "initialized data directory");

    println!("Initialized sirup data directory at {}", path.display());
    println!("Fiscal year: {}", fiscal_year);
    println!("Admin user: {}", options.admin_username.trim());
    if options.admin_password.is_none() {
        println!(
            "Warning: admin password is '{}'. Change it with 'sirup user update'.",
            DEFAULT_ADMIN_PASSWORD
        );
    }

    Ok(())
}
