use crate::errors::TrackerError;
use crate::models::{DayRecord, Entry};

// Groups themselves are fixed by whatever was loaded; only entries change.
impl DayRecord {
    pub fn set_entry(&mut self, group: usize, entry: usize, raw: &str) -> Result<Entry, TrackerError> {
        let slot = self
            .groups
            .get_mut(group)
            .ok_or(TrackerError::GroupOutOfRange(group))?
            .numbers
            .get_mut(entry)
            .ok_or(TrackerError::EntryOutOfRange { group, entry })?;
        *slot = Entry::parse(raw);
        Ok(*slot)
    }

    pub fn add_entry(&mut self, group: usize) -> Result<(), TrackerError> {
        self.groups
            .get_mut(group)
            .ok_or(TrackerError::GroupOutOfRange(group))?
            .numbers
            .push(Entry::Blank);
        Ok(())
    }

    /// Removing the last entry leaves the group empty.
    pub fn remove_entry(&mut self, group: usize, entry: usize) -> Result<Entry, TrackerError> {
        let numbers = &mut self
            .groups
            .get_mut(group)
            .ok_or(TrackerError::GroupOutOfRange(group))?
            .numbers;
        if entry >= numbers.len() {
            return Err(TrackerError::EntryOutOfRange { group, entry });
        }
        Ok(numbers.remove(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::total;

    fn record() -> DayRecord {
        DayRecord::template(&["Breakfast", "Lunch"])
    }

    #[test]
    fn set_entry_parses_or_blanks() {
        let mut record = record();
        assert_eq!(record.set_entry(0, 0, "350").unwrap(), Entry::Value(350.0));
        assert_eq!(record.set_entry(0, 0, "0").unwrap(), Entry::Value(0.0));
        assert_eq!(record.set_entry(0, 0, "lots").unwrap(), Entry::Blank);
        assert_eq!(record.groups[0].numbers, vec![Entry::Blank]);
    }

    #[test]
    fn add_then_remove_shifts_left() {
        let mut record = record();
        record.add_entry(1).unwrap();
        record.add_entry(1).unwrap();
        record.set_entry(1, 1, "10").unwrap();
        record.set_entry(1, 2, "20").unwrap();

        assert_eq!(record.remove_entry(1, 1).unwrap(), Entry::Value(10.0));
        assert_eq!(record.groups[1].numbers, vec![Entry::Blank, Entry::Value(20.0)]);
        assert_eq!(total(&record.groups), 20.0);
    }

    #[test]
    fn removing_only_entry_leaves_group_empty() {
        let mut record = record();
        record.remove_entry(0, 0).unwrap();
        assert!(record.groups[0].numbers.is_empty());
        assert_eq!(total(&record.groups), 0.0);
    }

    #[test]
    fn out_of_range_indices_leave_record_untouched() {
        let mut record = record();
        let before = record.clone();
        assert!(matches!(record.add_entry(9), Err(TrackerError::GroupOutOfRange(9))));
        assert!(matches!(
            record.set_entry(0, 3, "1"),
            Err(TrackerError::EntryOutOfRange { group: 0, entry: 3 })
        ));
        assert!(matches!(
            record.remove_entry(1, 1),
            Err(TrackerError::EntryOutOfRange { group: 1, entry: 1 })
        ));
        assert_eq!(record, before);
    }
}
