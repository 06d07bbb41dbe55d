//! Entity store and the schedule draft/publish flow.
//!
//! # Responsibility
//! - Own every notice, post, schedule row, worship info and attendance record
//!   for the process.
//! - Check the caller's capability on each entry point.
//! - Persist every mutation before returning.
//!
//! # Invariants
//! - In-memory state equals the last successful write plus nothing else:
//!   a failed write leaves memory at its pre-operation value.
//! - Notices and posts are newest first; comments are oldest first.

mod draft;
mod entity_store;

pub use draft::DraftSession;
pub use entity_store::{DashboardSummary, EntityStore};

use crate::auth::capability::AccessDenied;
use crate::model::ValidationError;
use crate::persistence::PersistenceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection an id lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Notice,
    Post,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Post => "post",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Forbidden(AccessDenied),
    /// No entity with this id; state is unchanged.
    NotFound { kind: EntityKind, id: String },
    Validation(ValidationError),
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden(err) => write!(f, "forbidden: {err}"),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Forbidden(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<AccessDenied> for StoreError {
    fn from(value: AccessDenied) -> Self {
        Self::Forbidden(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}
