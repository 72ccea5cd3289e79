//! Dashboard state aggregate
//!
//! All mutations go through [`AppData::apply`], which returns the subset of
//! collections that changed so the caller can hand exactly that to the
//! backend's `sync`.

use crate::domain::progress::{finalize, sync_with_opds};
use crate::domain::{NewsItem, Opd, ProgressData, SystemSettings, User};
use crate::error::{MonitorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The complete dashboard state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub opds: Vec<Opd>,
    #[serde(default)]
    pub progress: Vec<ProgressData>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub settings: SystemSettings,
}

/// Partial state handed to the backend; absent collections are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opds: Option<Vec<Opd>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Vec<ProgressData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<NewsItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SystemSettings>,
}

impl SyncPayload {
    /// Every collection of `data`
    pub fn full(data: &AppData) -> Self {
        SyncPayload {
            opds: Some(data.opds.clone()),
            progress: Some(data.progress.clone()),
            news: Some(data.news.clone()),
            users: Some(data.users.clone()),
            settings: Some(data.settings.clone()),
        }
    }

    /// Overwrite the collections present in this payload
    pub fn merge_into(self, data: &mut AppData) {
        if let Some(opds) = self.opds {
            data.opds = opds;
        }
        if let Some(progress) = self.progress {
            data.progress = progress;
        }
        if let Some(news) = self.news {
            data.news = news;
        }
        if let Some(users) = self.users {
            data.users = users;
        }
        if let Some(settings) = self.settings {
            data.settings = settings;
        }
    }

    /// Names of the collections carried, for logging
    pub fn collections(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.opds.is_some() {
            names.push("opds");
        }
        if self.progress.is_some() {
            names.push("progress");
        }
        if self.news.is_some() {
            names.push("news");
        }
        if self.users.is_some() {
            names.push("users");
        }
        if self.settings.is_some() {
            names.push("settings");
        }
        names
    }
}

/// A requested state change
#[derive(Debug, Clone)]
pub enum Update {
    /// Add a new OPD; fails when the id is taken
    CreateOpd(Opd),
    /// Add a new OPD or replace the one with the same id
    UpsertOpd(Opd),
    /// Replace the whole OPD list
    ReplaceOpds(Vec<Opd>),
    RemoveOpd(String),
    /// Replace one progress row, matched by OPD id
    UpsertProgress(ProgressData),
    /// Replace every row whose OPD id matches; unknown ids are skipped
    MergeProgress(Vec<ProgressData>),
    /// Carry today's percentage into the previous column
    FinalizeProgress,
    /// New items are placed first
    UpsertNews(NewsItem),
    RemoveNews(String),
    /// Append a new user; fails when the id is taken
    CreateUser(User),
    /// New users are appended
    UpsertUser(User),
    RemoveUser(String),
    UpdateSettings(SystemSettings),
    /// Replace everything from a backup
    Restore(AppData),
}

impl AppData {
    pub fn opd(&self, id: &str) -> Option<&Opd> {
        self.opds.iter().find(|o| o.id == id)
    }

    pub fn progress_for(&self, opd_id: &str) -> Option<&ProgressData> {
        self.progress.iter().find(|p| p.opd_id == opd_id)
    }

    pub fn news_item(&self, id: &str) -> Option<&NewsItem> {
        self.news.iter().find(|n| n.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_username(username))
    }

    /// Apply `update` and return the collections that changed.
    pub fn apply(&mut self, update: Update, now: DateTime<Utc>) -> Result<SyncPayload> {
        match update {
            Update::CreateOpd(opd) => {
                if self.opd(&opd.id).is_some() {
                    return Err(MonitorError::Invalid(format!(
                        "OPD id '{}' already exists",
                        opd.id
                    )));
                }
                self.apply(Update::UpsertOpd(opd), now)
            }
            Update::UpsertOpd(opd) => {
                validate_opd(&opd)?;
                let mut opds = self.opds.clone();
                match opds.iter_mut().find(|o| o.id == opd.id) {
                    Some(existing) => *existing = opd,
                    None => opds.push(opd),
                }
                self.set_opds(opds, now)
            }
            Update::ReplaceOpds(opds) => {
                for opd in &opds {
                    validate_opd(opd)?;
                }
                ensure_unique_ids(&opds)?;
                self.set_opds(opds, now)
            }
            Update::RemoveOpd(id) => {
                if self.opd(&id).is_none() {
                    return Err(MonitorError::not_found("OPD", id));
                }
                let opds = self.opds.iter().filter(|o| o.id != id).cloned().collect();
                self.set_opds(opds, now)
            }
            Update::UpsertProgress(row) => {
                if self.progress_for(&row.opd_id).is_none() {
                    return Err(MonitorError::not_found("OPD", row.opd_id));
                }
                self.merge_progress(vec![row]);
                Ok(self.progress_payload())
            }
            Update::MergeProgress(rows) => {
                self.merge_progress(rows);
                Ok(self.progress_payload())
            }
            Update::FinalizeProgress => {
                self.progress = finalize(&self.progress, now);
                Ok(self.progress_payload())
            }
            Update::UpsertNews(item) => {
                if item.title.trim().is_empty() {
                    return Err(MonitorError::Invalid("news title is empty".to_string()));
                }
                match self.news.iter_mut().find(|n| n.id == item.id) {
                    Some(existing) => *existing = item,
                    None => self.news.insert(0, item),
                }
                Ok(SyncPayload {
                    news: Some(self.news.clone()),
                    ..Default::default()
                })
            }
            Update::RemoveNews(id) => {
                if self.news_item(&id).is_none() {
                    return Err(MonitorError::not_found("News", id));
                }
                self.news.retain(|n| n.id != id);
                Ok(SyncPayload {
                    news: Some(self.news.clone()),
                    ..Default::default()
                })
            }
            Update::CreateUser(user) => {
                if self.user(&user.id).is_some() {
                    return Err(MonitorError::Invalid(format!(
                        "user id '{}' already exists",
                        user.id
                    )));
                }
                self.apply(Update::UpsertUser(user), now)
            }
            Update::UpsertUser(user) => {
                if user.username.trim().is_empty() {
                    return Err(MonitorError::Invalid("username is empty".to_string()));
                }
                if self
                    .users
                    .iter()
                    .any(|u| u.id != user.id && u.has_username(&user.username))
                {
                    return Err(MonitorError::Invalid(format!(
                        "username '{}' is already taken",
                        user.username
                    )));
                }
                let mut users = self.users.clone();
                match users.iter_mut().find(|u| u.id == user.id) {
                    Some(existing) => *existing = user,
                    None => users.push(user),
                }
                self.set_users(users)
            }
            Update::RemoveUser(id) => {
                if self.user(&id).is_none() {
                    return Err(MonitorError::not_found("User", id));
                }
                let users = self.users.iter().filter(|u| u.id != id).cloned().collect();
                self.set_users(users)
            }
            Update::UpdateSettings(settings) => {
                self.settings = settings;
                Ok(SyncPayload {
                    settings: Some(self.settings.clone()),
                    ..Default::default()
                })
            }
            Update::Restore(snapshot) => {
                ensure_unique_ids(&snapshot.opds)?;
                let progress = sync_with_opds(&snapshot.opds, &snapshot.progress, now);
                *self = AppData {
                    progress,
                    ..snapshot
                };
                Ok(SyncPayload::full(self))
            }
        }
    }

    fn set_opds(&mut self, opds: Vec<Opd>, now: DateTime<Utc>) -> Result<SyncPayload> {
        self.progress = sync_with_opds(&opds, &self.progress, now);
        self.opds = opds;
        Ok(SyncPayload {
            opds: Some(self.opds.clone()),
            progress: Some(self.progress.clone()),
            ..Default::default()
        })
    }

    fn set_users(&mut self, users: Vec<User>) -> Result<SyncPayload> {
        if !self.users.is_empty() && !users.iter().any(User::is_admin) {
            return Err(MonitorError::Invalid(
                "at least one admin user must remain".to_string(),
            ));
        }
        self.users = users;
        Ok(SyncPayload {
            users: Some(self.users.clone()),
            ..Default::default()
        })
    }

    /// Replace matching rows; the target budget always follows the OPD.
    fn merge_progress(&mut self, rows: Vec<ProgressData>) {
        for row in rows {
            let target = match self.opd(&row.opd_id) {
                Some(opd) => opd.pagu_murni,
                None => continue,
            };
            if let Some(existing) = self.progress.iter_mut().find(|p| p.opd_id == row.opd_id) {
                *existing = ProgressData {
                    pagu_target: target,
                    ..row
                };
            }
        }
    }

    fn progress_payload(&self) -> SyncPayload {
        SyncPayload {
            progress: Some(self.progress.clone()),
            ..Default::default()
        }
    }
}

fn validate_opd(opd: &Opd) -> Result<()> {
    if opd.id.trim().is_empty() {
        return Err(MonitorError::Invalid("OPD id is empty".to_string()));
    }
    if opd.name.trim().is_empty() {
        return Err(MonitorError::Invalid("OPD name is empty".to_string()));
    }
    if !opd.pagu_murni.is_finite() || opd.pagu_murni < 0.0 {
        return Err(MonitorError::Invalid(format!(
            "pagu for '{}' must be a non-negative number",
            opd.name
        )));
    }
    Ok(())
}

fn ensure_unique_ids(opds: &[Opd]) -> Result<()> {
    let mut seen = HashSet::new();
    for opd in opds {
        if !seen.insert(opd.id.as_str()) {
            return Err(MonitorError::Invalid(format!(
                "duplicate OPD id '{}'",
                opd.id
            )));
        }
    }
    Ok(())
}
