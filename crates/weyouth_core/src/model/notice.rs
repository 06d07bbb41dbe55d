//! Notices published by teachers and admins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Worship,
    Event,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Display name of the creating session; never changes.
    pub author: String,
    pub category: NoticeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Editor input for a new notice. Id, date and author are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeDraft {
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub image_url: Option<String>,
}

impl NoticeDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: NoticeCategory,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            image_url: None,
        }
    }
}

/// Partial update for an existing notice. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoticeCategory>,
    /// `Some(None)` clears the image.
    pub image_url: Option<Option<String>>,
}

impl NoticePatch {
    /// Applies the patch, leaving `id`, `date` and `author` untouched.
    pub fn apply_to(&self, notice: &Notice) -> Notice {
        let mut next = notice.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(content) = &self.content {
            next.content = content.clone();
        }
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(image_url) = &self.image_url {
            next.image_url = image_url.clone();
        }
        next
    }
}
