//! Community feed posts and their comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Talk,
    Prayer,
}

/// Feed tab filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    Only(PostCategory),
}

impl PostFilter {
    pub fn matches(self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => post.category == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub category: PostCategory,
    pub created_at: DateTime<Utc>,
    /// Increment-only; repeat likes by the same viewer all count.
    pub likes: u64,
    /// Chronological, append-only.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Member input for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: PostCategory,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: PostCategory,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
        }
    }
}
