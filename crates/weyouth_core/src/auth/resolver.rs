//! Name/password to session resolution.
//!
//! # Invariants
//! - Resolution order is fixed: empty name, master-admin set, special-teacher
//!   set, shared secret. The first match wins.
//! - Name-set members never need a password.
//! - `grade` is set only for student sessions.

use crate::clock::Clock;
use crate::config::AuthPolicy;
use crate::model::session::{Role, RoleChoice, Session};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    EmptyName,
    WrongPassword,
}

impl AuthError {
    /// Field-level message shown next to the offending input.
    pub fn field_message(self) -> &'static str {
        match self {
            Self::EmptyName => "성함을 입력해주세요!",
            Self::WrongPassword => "비밀번호가 틀렸습니다",
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::WrongPassword => write!(f, "password does not match"),
        }
    }
}

impl Error for AuthError {}

/// Resolves login input into a session using a fixed policy.
pub struct IdentityResolver<C: Clock> {
    policy: AuthPolicy,
    clock: C,
}

impl<C: Clock> IdentityResolver<C> {
    pub fn new(policy: AuthPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    /// Resolves `name` + `password` into a session.
    ///
    /// `role_choice` is consulted only for members outside both name sets.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `WrongPassword` when a regular member's password differs from the
    ///   shared secret.
    pub fn resolve(
        &self,
        name: &str,
        password: &str,
        role_choice: RoleChoice,
    ) -> Result<Session, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }

        let stamp = self.clock.now().timestamp_millis();

        if contains_name(&self.policy.master_admin_names, name) {
            return Ok(Session {
                id: format!("admin_{stamp}"),
                name: name.to_string(),
                role: Role::Admin,
                grade: None,
            });
        }

        if contains_name(&self.policy.special_teacher_names, name) {
            return Ok(Session {
                id: format!("teacher_{stamp}"),
                name: name.to_string(),
                role: Role::Teacher,
                grade: None,
            });
        }

        if password != self.policy.shared_secret {
            return Err(AuthError::WrongPassword);
        }

        let (prefix, grade) = match role_choice {
            RoleChoice::Student => ("s", Some(self.policy.default_student_grade)),
            RoleChoice::Teacher => ("t", None),
        };
        Ok(Session {
            id: format!("{prefix}_{stamp}"),
            name: name.to_string(),
            role: role_choice.into(),
            grade,
        })
    }
}

fn contains_name(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate == name)
}
