//! Dashboard users and credential checks

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including users, settings and restore
    Admin,
    /// Data entry: OPDs, progress and news
    #[default]
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Operator => f.write_str("operator"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            _ => Err(format!(
                "Invalid role: '{}'. Valid roles are: admin, operator",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    salt: String,
    password_hash: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        password: &str,
    ) -> Self {
        let mut user = User {
            id: uuid::Uuid::new_v4().simple().to_string(),
            username: username.into(),
            name: name.into(),
            role,
            salt: String::new(),
            password_hash: String::new(),
        };
        user.set_password(password);
        user
    }

    /// Replace the password with a freshly salted hash
    pub fn set_password(&mut self, password: &str) {
        self.salt = uuid::Uuid::new_v4().simple().to_string();
        self.password_hash = hash_password(&self.salt, password);
    }

    pub fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }

    /// Usernames compare case-insensitively
    pub fn has_username(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Find the user whose credentials match, if any
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.has_username(username))
        .filter(|u| u.verify(password))
}
