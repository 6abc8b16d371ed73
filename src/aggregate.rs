use crate::models::{Entry, MealGroup};

/// Sum of every numeric entry in the group. Blanks contribute nothing.
pub fn group_total(group: &MealGroup) -> f64 {
    group.numbers.iter().copied().map(Entry::value).sum()
}

pub fn total(groups: &[MealGroup]) -> f64 {
    groups.iter().map(group_total).sum()
}

pub fn group_totals(groups: &[MealGroup]) -> Vec<f64> {
    groups.iter().map(group_total).collect()
}
