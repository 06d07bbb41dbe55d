//! Privileged editor's working copy of schedule and worship info.

use crate::model::schedule::{ScheduleEntry, ScheduleField, WorshipField, WorshipInfo};
use crate::model::ValidationError;

/// Buffered, unpublished edits.
///
/// Holds owned copies; nothing here is visible to other readers until the
/// draft is handed to `EntityStore::publish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSession {
    schedule: Vec<ScheduleEntry>,
    worship_info: WorshipInfo,
    dirty: bool,
}

impl DraftSession {
    /// Deep-copies the published values into a new draft.
    pub fn open(schedule: &[ScheduleEntry], worship_info: &WorshipInfo) -> Self {
        Self {
            schedule: schedule.to_vec(),
            worship_info: worship_info.clone(),
            dirty: false,
        }
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    pub fn worship_info(&self) -> &WorshipInfo {
        &self.worship_info
    }

    /// Whether any edit happened since `open`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn edit_schedule_field(
        &mut self,
        index: usize,
        field: ScheduleField,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let len = self.schedule.len();
        let entry = self
            .schedule
            .get_mut(index)
            .ok_or(ValidationError::InvalidScheduleIndex { index, len })?;
        let value = value.into();
        match field {
            ScheduleField::Day => entry.day = value,
            ScheduleField::Title => entry.title = value,
            ScheduleField::Time => entry.time = value,
        }
        self.dirty = true;
        Ok(())
    }

    /// Appends a placeholder row and returns its index.
    pub fn add_schedule_row(&mut self) -> usize {
        self.schedule.push(ScheduleEntry::placeholder());
        self.dirty = true;
        self.schedule.len() - 1
    }

    pub fn remove_schedule_row(&mut self, index: usize) -> Result<ScheduleEntry, ValidationError> {
        if index >= self.schedule.len() {
            return Err(ValidationError::InvalidScheduleIndex {
                index,
                len: self.schedule.len(),
            });
        }
        self.dirty = true;
        Ok(self.schedule.remove(index))
    }

    pub fn edit_worship_info(&mut self, field: WorshipField, value: impl Into<String>) {
        let value = value.into();
        match field {
            WorshipField::Time => self.worship_info.time = value,
            WorshipField::Location => self.worship_info.location = value,
        }
        self.dirty = true;
    }

    pub(crate) fn into_parts(self) -> (Vec<ScheduleEntry>, WorshipInfo) {
        (self.schedule, self.worship_info)
    }
}

#[cfg(test)]
mod tests {
    use super::DraftSession;
    use crate::model::schedule::{ScheduleEntry, ScheduleField, WorshipField};
    use crate::model::seed::{default_schedule, default_worship_info};
    use crate::model::ValidationError;

    #[test]
    fn edits_never_touch_the_source_values() {
        let schedule = default_schedule();
        let worship = default_worship_info();
        let mut draft = DraftSession::open(&schedule, &worship);

        draft
            .edit_schedule_field(0, ScheduleField::Time, "20:00")
            .expect("row 0 exists");
        draft.edit_worship_info(WorshipField::Location, "본당");

        assert_eq!(schedule[0].time, "19:00");
        assert_eq!(worship.location, "지하 1층");
        assert_eq!(draft.schedule()[0].time, "20:00");
        assert_eq!(draft.worship_info().location, "본당");
        assert!(draft.is_dirty());
    }

    #[test]
    fn add_and_remove_rows() {
        let mut draft = DraftSession::open(&default_schedule(), &default_worship_info());
        assert!(!draft.is_dirty());

        let index = draft.add_schedule_row();
        assert_eq!(index, 3);
        assert_eq!(draft.schedule()[3], ScheduleEntry::placeholder());

        let removed = draft.remove_schedule_row(0).expect("row 0 exists");
        assert_eq!(removed.day, "월");
        assert_eq!(draft.schedule().len(), 3);
        assert_eq!(draft.schedule()[0].day, "목");
    }

    #[test]
    fn out_of_range_rows_are_rejected() {
        let mut draft = DraftSession::open(&[], &default_worship_info());
        assert_eq!(
            draft.edit_schedule_field(0, ScheduleField::Day, "화"),
            Err(ValidationError::InvalidScheduleIndex { index: 0, len: 0 })
        );
        assert!(draft.remove_schedule_row(2).is_err());
        assert!(!draft.is_dirty());
    }
}
