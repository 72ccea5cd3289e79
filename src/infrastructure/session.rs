//! Login session stored next to the data

use crate::domain::{Role, User};
use crate::error::{MonitorError, Result};
use crate::infrastructure::config::DATA_DIR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, now: DateTime<Utc>) -> Self {
        Session {
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            logged_in_at: now,
        }
    }

    fn path(root: &Path) -> PathBuf {
        root.join(DATA_DIR).join("session.toml")
    }

    /// Load the session of `root`, `None` when nobody is logged in
    pub fn load_from_dir(root: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(Self::path(root)) {
            Ok(contents) => {
                let session = toml::from_str(&contents).map_err(|e| {
                    MonitorError::Config(format!("Failed to parse session.toml: {}", e))
                })?;
                Ok(Some(session))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MonitorError::Io(e)),
        }
    }

    pub fn save_to_dir(&self, root: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(Self::path(root), contents)?;
        Ok(())
    }

    /// Remove the session file; returns whether one existed
    pub fn clear_in_dir(root: &Path) -> Result<bool> {
        match fs::remove_file(Self::path(root)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MonitorError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_lifecycle() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(DATA_DIR)).unwrap();
        assert!(Session::load_from_dir(temp.path()).unwrap().is_none());

        let user = User::new("operator", "Operator", Role::Operator, "pw");
        let session = Session::for_user(&user, Utc::now());
        session.save_to_dir(temp.path()).unwrap();

        let loaded = Session::load_from_dir(temp.path()).unwrap().unwrap();
        assert_eq!(loaded, session);

        assert!(Session::clear_in_dir(temp.path()).unwrap());
        assert!(!Session::clear_in_dir(temp.path()).unwrap());
    }
}
