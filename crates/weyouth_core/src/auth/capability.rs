//! Role capability matrix.

use crate::model::session::{Role, Session};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Action class gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Read notices, posts and schedule.
    ReadContent,
    /// Create, edit and delete notices.
    ManageNotices,
    /// Edit schedule rows and worship info.
    EditSchedule,
    /// Post, comment, like and check in.
    Participate,
    AccessAdminDashboard,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadContent => "read_content",
            Self::ManageNotices => "manage_notices",
            Self::EditSchedule => "edit_schedule",
            Self::Participate => "participate",
            Self::AccessAdminDashboard => "access_admin_dashboard",
        }
    }
}

impl Role {
    /// Returns whether this role may perform `capability`.
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::ReadContent | Capability::Participate => true,
            Capability::ManageNotices
            | Capability::EditSchedule
            | Capability::AccessAdminDashboard => matches!(self, Role::Teacher | Role::Admin),
        }
    }
}

/// Session lacked the capability for the attempted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub role: Role,
    pub capability: Capability,
}

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "role `{}` lacks capability `{}`",
            self.role.as_str(),
            self.capability.as_str()
        )
    }
}

impl Error for AccessDenied {}

/// Checks `session` against the capability matrix.
pub fn authorize(session: &Session, capability: Capability) -> Result<(), AccessDenied> {
    if session.role.allows(capability) {
        Ok(())
    } else {
        Err(AccessDenied {
            role: session.role,
            capability,
        })
    }
}
