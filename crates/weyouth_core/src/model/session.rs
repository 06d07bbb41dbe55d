//! Resolved identity for the current process.

use serde::{Deserialize, Serialize};

/// Authorization tier of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Label shown on the profile screen.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Student => "Youth Student",
            Self::Teacher => "Youth Teacher",
            Self::Admin => "Master Admin",
        }
    }
}

/// Role a regular member asks for on the login screen.
///
/// Admin is never selectable; it is granted only by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChoice {
    Student,
    Teacher,
}

impl From<RoleChoice> for Role {
    fn from(value: RoleChoice) -> Self {
        match value {
            RoleChoice::Student => Role::Student,
            RoleChoice::Teacher => Role::Teacher,
        }
    }
}

/// Role-tagged identity created once at login.
///
/// Immutable for its lifetime; logout drops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Present only for students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
}

impl Session {
    pub fn is_master_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
