//! Weekly schedule rows and the worship info card.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day: String,
    pub title: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_main: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ScheduleEntry {
    pub fn new(day: impl Into<String>, title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            title: title.into(),
            time: time.into(),
            is_main: None,
            kind: None,
        }
    }

    /// Placeholder row appended by the schedule editor.
    pub fn placeholder() -> Self {
        Self::new("신규", "새 일정 내용", "시간")
    }
}

/// Text field of a schedule row editable in a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    Day,
    Title,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorshipInfo {
    pub time: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorshipField {
    Time,
    Location,
}
