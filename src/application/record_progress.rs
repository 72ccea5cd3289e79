//! Daily progress input use case

use crate::application::auth::require_user;
use crate::application::commit;
use crate::domain::template::{self, parse_import};
use crate::domain::{Opd, ProgressData, ProgressUpdate, Update};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Service for entering, importing and finalizing progress rows
pub struct ProgressService {
    repository: FileSystemRepository,
}

impl ProgressService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ProgressService { repository }
    }

    /// The OPD and its progress row
    pub fn show(&self, opd_id: &str) -> Result<(Opd, ProgressData)> {
        let data = self.repository.load_data()?;
        let opd = data
            .opd(opd_id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("OPD", opd_id))?;
        let row = data
            .progress_for(opd_id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("OPD", opd_id))?;
        Ok((opd, row))
    }

    /// Replace the given channel values of one row
    pub fn set(&self, opd_id: &str, update: &ProgressUpdate) -> Result<ProgressData> {
        require_user(&self.repository)?;
        if update.is_empty() {
            return Err(MonitorError::Invalid(
                "nothing to update; pass at least one --*-paket or --*-pagu value".to_string(),
            ));
        }
        for pagu in [update.penyedia_pagu, update.swakelola_pagu, update.pds_pagu]
            .into_iter()
            .flatten()
        {
            if !pagu.is_finite() || pagu < 0.0 {
                return Err(MonitorError::Invalid(format!(
                    "pagu must be a non-negative number, got {}",
                    pagu
                )));
            }
        }

        let (_, row) = self.show(opd_id)?;
        let updated = update.apply_to(&row, Utc::now());
        let data = commit(&self.repository, Update::UpsertProgress(updated))?;
        data.progress_for(opd_id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("OPD", opd_id))
    }

    /// The input template as CSV text, with its suggested file name
    pub fn template(&self) -> Result<(String, String)> {
        let data = self.repository.load_data()?;
        let csv = template::render_template(&data)?;
        Ok((template::file_name(&data.settings.ta), csv))
    }

    /// Apply a filled-in template; returns the rows that were updated
    pub fn import(&self, path: &Path) -> Result<Vec<ProgressData>> {
        require_user(&self.repository)?;
        let bytes = fs::read(path)?;
        let data = self.repository.load_data()?;
        let rows = parse_import(&bytes, &data, Utc::now())?;
        tracing::info!(rows = rows.len(), file = %path.display(), "importing template");

        commit(&self.repository, Update::MergeProgress(rows.clone()))?;
        Ok(rows)
    }

    /// Carry today's percentages into the previous column; returns the row count
    pub fn finalize(&self) -> Result<usize> {
        require_user(&self.repository)?;
        let data = commit(&self.repository, Update::FinalizeProgress)?;
        tracing::info!(rows = data.progress.len(), "finalized progress");
        Ok(data.progress.len())
    }
}
