//! User entity representing an application account in the CareRecord system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to an application account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator: may manage accounts in addition to records
    Admin,
    /// Regular user: may manage patient records only
    User,
}

impl UserRole {
    /// Parse a role from its stored string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }

    /// Stored string form of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database identifier (auto-increment)
    pub id: i64,

    /// Login name, unique across accounts
    pub username: String,

    /// Bcrypt hash of the account password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role assigned to the account
    pub role: UserRole,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance; the id is assigned by the store on insert
    pub fn new(username: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Changes the account role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Checks if the account has administrator privileges
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
