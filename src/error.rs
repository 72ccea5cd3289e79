//! Error types for sirup

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the monitor application
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Not a sirup directory: {0}")]
    NotInitialized(PathBuf),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid value: {0}")]
    Invalid(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MonitorError {
    /// Shorthand for a missing record of the given kind
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        MonitorError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MonitorError::NotInitialized(_) => 2,
            MonitorError::NotFound { .. } => 3,
            MonitorError::Invalid(_) => 4,
            MonitorError::Import(_) => 5,
            MonitorError::InvalidCredentials => 6,
            MonitorError::NotLoggedIn | MonitorError::PermissionDenied(_) => 7,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MonitorError::NotInitialized(path) => {
                format!(
                    "Not a sirup directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'sirup init' in this directory to create a new data store\n\
                    • Navigate to an existing sirup directory\n\
                    • Set SIRUP_ROOT environment variable to your data directory",
                    path.display()
                )
            }
            MonitorError::NotFound { kind, id } => {
                format!(
                    "{} not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'sirup {} list' to see existing ids\n\
                    • Ids are case-sensitive",
                    kind,
                    id,
                    kind.to_lowercase()
                )
            }
            MonitorError::Import(msg) => {
                format!(
                    "Import failed: {}\n\n\
                    Suggestions:\n\
                    • Download a fresh file with 'sirup progress template'\n\
                    • Keep the 8 columns: ID OPD, Nama Satuan Kerja, then Paket/Pagu for \
                    Penyedia, Swakelola and PdS\n\
                    • The ID OPD column must match an existing OPD",
                    msg
                )
            }
            MonitorError::InvalidCredentials => "Invalid username or password\n\n\
                Suggestions:\n\
                • Usernames are case-insensitive, passwords are not\n\
                • Pass the password with --password or SIRUP_PASSWORD"
                .to_string(),
            MonitorError::NotLoggedIn => "Not logged in\n\n\
                Suggestions:\n\
                • Run 'sirup login <username>' first\n\
                • Public views (recap, tv, news list, serve) work without a login"
                .to_string(),
            MonitorError::Config(msg) => {
                if msg.contains("Unknown config key") || msg.contains("Unknown setting") {
                    format!(
                        "{}\n\n\
                        Example: sirup config page_size 25\n\
                        Use --list to see all keys",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MonitorError
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_suggestion() {
        let err = MonitorError::NotInitialized(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("sirup init"));
        assert!(msg.contains("SIRUP_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_not_found_points_to_list_command() {
        let err = MonitorError::not_found("OPD", "opd-009");
        assert_eq!(err.to_string(), "OPD not found: opd-009");
        assert!(err.display_with_suggestions().contains("sirup opd list"));
    }

    #[test]
    fn test_import_suggestions() {
        let err = MonitorError::Import("no valid data found in file".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("sirup progress template"));
        assert!(msg.contains("8 columns"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MonitorError::NotInitialized(PathBuf::new()).exit_code(), 2);
        assert_eq!(MonitorError::not_found("News", "x").exit_code(), 3);
        assert_eq!(MonitorError::Import(String::new()).exit_code(), 5);
        assert_eq!(MonitorError::InvalidCredentials.exit_code(), 6);
        assert_eq!(MonitorError::NotLoggedIn.exit_code(), 7);
        assert_eq!(MonitorError::Config(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_config_unknown_key_suggestions() {
        let err = MonitorError::Config("Unknown config key: 'xyz'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("sirup config page_size 25"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = MonitorError::Invalid("page size must be positive".to_string());
        assert_eq!(
            err.display_with_suggestions(),
            "Invalid value: page size must be positive"
        );
    }
}
