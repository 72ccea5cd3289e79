//! User management use case (admin only)

use crate::application::auth::require_admin;
use crate::application::commit;
use crate::domain::{Role, Update, User};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

pub struct UserService {
    repository: FileSystemRepository,
}

impl UserService {
    pub fn new(repository: FileSystemRepository) -> Self {
        UserService { repository }
    }

    pub fn list(&self) -> Result<Vec<User>> {
        require_admin(&self.repository)?;
        Ok(self.repository.load_data()?.users)
    }

    pub fn add(&self, username: &str, name: &str, password: &str, role: Role) -> Result<User> {
        require_admin(&self.repository)?;
        if password.is_empty() {
            return Err(MonitorError::Invalid("password is empty".to_string()));
        }
        let user = User::new(username.trim(), name.trim(), role, password);
        commit(&self.repository, Update::CreateUser(user.clone()))?;
        tracing::info!(username = %user.username, role = %user.role, "added user");
        Ok(user)
    }

    pub fn update(&self, id: &str, changes: UserChanges) -> Result<User> {
        require_admin(&self.repository)?;
        let data = self.repository.load_data()?;
        let mut user = data
            .user(id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("User", id))?;

        if let Some(name) = changes.name {
            user.name = name.trim().to_string();
        }
        if let Some(password) = changes.password {
            if password.is_empty() {
                return Err(MonitorError::Invalid("password is empty".to_string()));
            }
            user.set_password(&password);
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        commit(&self.repository, Update::UpsertUser(user.clone()))?;
        Ok(user)
    }

    pub fn remove(&self, id: &str) -> Result<User> {
        require_admin(&self.repository)?;
        let data = self.repository.load_data()?;
        let user = data
            .user(id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("User", id))?;
        commit(&self.repository, Update::RemoveUser(id.to_string()))?;
        tracing::info!(username = %user.username, "removed user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::auth::AuthService;
    use crate::application::test_support::logged_in_admin;

    #[test]
    fn test_add_update_remove() {
        let (_temp, repo) = logged_in_admin();
        let service = UserService::new(repo.clone());

        let op = service.add("operator1", "Operator Satu", "a", Role::Operator).unwrap();
        assert_eq!(service.list().unwrap().len(), 2);

        service
            .update(
                &op.id,
                UserChanges {
                    password: Some("b".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let auth = AuthService::new(repo.clone());
        assert!(auth.login("operator1", "a").is_err());
        auth.login("operator1", "b").unwrap();

        // the operator may not manage users
        assert!(matches!(
            service.list().unwrap_err(),
            MonitorError::PermissionDenied(_)
        ));

        auth.login("admin", "pw").unwrap();
        service.remove(&op.id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_last_admin_cannot_be_demoted() {
        let (_temp, repo) = logged_in_admin();
        let service = UserService::new(repo);
        let admin = service.list().unwrap().remove(0);

        let err = service
            .update(
                &admin.id,
                UserChanges {
                    role: Some(Role::Operator),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("admin"));
        assert!(service.remove(&admin.id).is_err());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (_temp, repo) = logged_in_admin();
        let service = UserService::new(repo);
        assert!(service.add("ADMIN", "x", "pw", Role::Operator).is_err());
    }
}
