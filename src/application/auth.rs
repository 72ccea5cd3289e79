//! Login, logout and permission checks

use crate::domain::user::authenticate;
use crate::domain::User;
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository, Session};
use chrono::Utc;

/// Service for the login session
pub struct AuthService {
    repository: FileSystemRepository,
}

impl AuthService {
    pub fn new(repository: FileSystemRepository) -> Self {
        AuthService { repository }
    }

    /// Check credentials and remember the user for later commands
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let data = self.repository.load_data()?;
        let user = authenticate(&data.users, username, password)
            .ok_or(MonitorError::InvalidCredentials)?
            .clone();

        self.repository
            .save_session(&Session::for_user(&user, Utc::now()))?;
        tracing::info!(username = %user.username, role = %user.role, "logged in");
        Ok(user)
    }

    /// Forget the current session; returns whether someone was logged in
    pub fn logout(&self) -> Result<bool> {
        self.repository.clear_session()
    }

    /// The logged-in user, if the session still names an existing account
    pub fn current_user(&self) -> Result<Option<User>> {
        current_user(&self.repository)
    }
}

pub fn current_user(repository: &FileSystemRepository) -> Result<Option<User>> {
    let Some(session) = repository.load_session()? else {
        return Ok(None);
    };
    let data = repository.load_data()?;
    let user = data.user(&session.user_id).cloned();
    if user.is_none() {
        tracing::warn!(username = %session.username, "session refers to a removed user");
    }
    Ok(user)
}

/// Any logged-in user
pub fn require_user(repository: &FileSystemRepository) -> Result<User> {
    current_user(repository)?.ok_or(MonitorError::NotLoggedIn)
}

/// A logged-in admin
pub fn require_admin(repository: &FileSystemRepository) -> Result<User> {
    let user = require_user(repository)?;
    if !user.is_admin() {
        return Err(MonitorError::PermissionDenied(format!(
            "'{}' is not an admin",
            user.username
        )));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::{init, InitOptions};
    use crate::domain::{Role, SyncPayload, Update};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let options = InitOptions {
            admin_password: Some("pw".to_string()),
            ..Default::default()
        };
        init(temp.path(), &options).unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, repo)
    }

    #[test]
    fn test_login_and_logout() {
        let (_temp, repo) = setup();
        let auth = AuthService::new(repo.clone());

        assert!(matches!(
            require_user(&repo).unwrap_err(),
            MonitorError::NotLoggedIn
        ));

        let user = auth.login("Admin", "pw").unwrap();
        assert_eq!(require_admin(&repo).unwrap(), user);

        assert!(auth.logout().unwrap());
        assert!(auth.current_user().unwrap().is_none());
    }

    #[test]
    fn test_wrong_password() {
        let (_temp, repo) = setup();
        let err = AuthService::new(repo).login("admin", "nope").unwrap_err();
        assert!(matches!(err, MonitorError::InvalidCredentials));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_operator_is_not_admin() {
        let (_temp, repo) = setup();
        let mut data = repo.load_data().unwrap();
        let op = User::new("op", "Operator", Role::Operator, "x");
        let payload: SyncPayload = data
            .apply(Update::UpsertUser(op), Utc::now())
            .unwrap();
        repo.sync(payload).unwrap();

        AuthService::new(repo.clone()).login("op", "x").unwrap();
        assert!(require_user(&repo).is_ok());
        assert!(matches!(
            require_admin(&repo).unwrap_err(),
            MonitorError::PermissionDenied(_)
        ));
    }
}
