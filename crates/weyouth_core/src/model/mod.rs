//! Domain model for the youth-group community core.
//!
//! # Responsibility
//! - Define the records owned by the entity store and the resolved session.
//! - Fix the JSON shape used by persisted records.
//!
//! # Invariants
//! - Every entity is identified by an id unique within its collection.
//! - Comments exist only inside their parent post.

pub mod attendance;
pub mod notice;
pub mod post;
pub mod schedule;
pub mod seed;
pub mod session;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Presence checks applied to user-authored input before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyContent,
    InvalidScheduleIndex { index: usize, len: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::InvalidScheduleIndex { index, len } => {
                write!(f, "schedule row {index} is out of range (rows: {len})")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank title or content.
pub(crate) fn require_title_and_content(title: &str, content: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}
