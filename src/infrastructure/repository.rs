//! File system repository

use crate::domain::{AppData, SyncPayload};
use crate::error::{MonitorError, Result};
use crate::infrastructure::config::DATA_DIR;
use crate::infrastructure::{Config, Session};
use std::fs;
use std::path::{Path, PathBuf};

const DATA_FILE: &str = "data.json";

/// Abstract repository for dashboard storage
pub trait MonitorRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .sirup/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .sirup/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .sirup directory exists
    fn is_initialized(&self) -> bool;

    /// Create .sirup directory structure
    fn initialize(&self) -> Result<()>;

    /// Read the full dashboard snapshot
    fn load_data(&self) -> Result<AppData>;

    /// Persist the collections present in `payload`, leaving the others untouched
    fn sync(&self, payload: SyncPayload) -> Result<()>;
}

/// File system implementation of MonitorRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover data root by walking up from current directory
    /// First checks SIRUP_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("SIRUP_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_data_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MonitorError::Config(format!(
                    "SIRUP_ROOT is set to '{}' but no .sirup directory found. \
                    Run 'sirup init' in that directory or unset SIRUP_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover data root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_data_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MonitorError::NotInitialized(start.to_path_buf())),
            }
        }
    }

    fn has_data_dir(path: &Path) -> bool {
        path.join(DATA_DIR).is_dir()
    }

    fn data_path(&self) -> PathBuf {
        self.root.join(DATA_DIR).join(DATA_FILE)
    }

    pub fn load_session(&self) -> Result<Option<Session>> {
        Session::load_from_dir(&self.root)
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        session.save_to_dir(&self.root)
    }

    pub fn clear_session(&self) -> Result<bool> {
        Session::clear_in_dir(&self.root)
    }

    /// Write the snapshot using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    fn write_data_atomic(&self, data: &AppData) -> Result<()> {
        let path = self.data_path();
        let contents = serde_json::to_string_pretty(data)?;

        let tmp_path = path.with_file_name(format!(
            "{}.sirup-tmp-{}",
            DATA_FILE,
            std::process::id()
        ));
        fs::write(&tmp_path, contents)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl MonitorRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_data_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let data_dir = self.root.join(DATA_DIR);

        if data_dir.exists() {
            return Err(MonitorError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&data_dir)?;
        Ok(())
    }

    fn load_data(&self) -> Result<AppData> {
        if !self.is_initialized() {
            return Err(MonitorError::NotInitialized(self.root.clone()));
        }
        match fs::read_to_string(self.data_path()) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(root = %self.root.display(), "no data.json yet, starting empty");
                Ok(AppData::default())
            }
            Err(e) => Err(MonitorError::Io(e)),
        }
    }

    fn sync(&self, payload: SyncPayload) -> Result<()> {
        let collections = payload.collections();
        if collections.is_empty() {
            return Ok(());
        }
        let mut data = self.load_data()?;
        payload.merge_into(&mut data);
        self.write_data_atomic(&data)?;
        tracing::info!(?collections, "synced to {}", self.data_path().display());
        Ok(())
    }
}
