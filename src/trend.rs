use crate::aggregate::total;
use crate::errors::TrackerError;
use crate::models::{CalorieDataPoint, DayRecord};
use crate::storage::Store;
use chrono::{Days, NaiveDate};

pub const WINDOW_DAYS: u64 = 7;

/// Trailing window ending at `today`, oldest first. Today's point comes from
/// the live record so edits show up before anything is read back from disk;
/// earlier days come from the store and count as zero when never saved.
pub fn build_trend_at(
    today: NaiveDate,
    live: &DayRecord,
    store: &Store,
) -> Result<Vec<CalorieDataPoint>, TrackerError> {
    let locale = store.locale();
    let mut points = Vec::with_capacity(WINDOW_DAYS as usize);
    for offset in (0..WINDOW_DAYS).rev() {
        let date = window_day(today, offset)?;
        let calories = if offset == 0 {
            total(&live.groups)
        } else {
            total(&store.load_day(date).groups)
        };
        points.push(CalorieDataPoint {
            calories,
            label: locale.weekday_label(date).to_string(),
        });
    }
    Ok(points)
}

/// The day `offset` days before `today`, if the calendar reaches that far back.
pub fn window_day(today: NaiveDate, offset: u64) -> Result<NaiveDate, TrackerError> {
    today
        .checked_sub_days(Days::new(offset))
        .ok_or(TrackerError::DateOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::models::{Entry, MealGroup};
    use crate::storage::test_support::TestData;

    fn record_with(calories: f64) -> DayRecord {
        DayRecord {
            groups: vec![MealGroup {
                name: "Lunch".into(),
                numbers: vec![Entry::Value(calories)],
            }],
        }
    }

    #[tokio::test]
    async fn unsaved_history_is_zero() {
        let data = TestData::new();
        let store = data.open(Locale::English).await;
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

        let trend = build_trend_at(today, &record_with(500.0), &store).unwrap();
        let calories: Vec<f64> = trend.iter().map(|p| p.calories).collect();
        assert_eq!(calories, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 500.0]);

        let labels: Vec<&str> = trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"]);
    }

    #[tokio::test]
    async fn live_record_wins_over_stored_copy() {
        let data = TestData::new();
        let mut store = data.open(Locale::English).await;
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let two_days_ago = window_day(today, 2).unwrap();
        store.save_day(two_days_ago, &record_with(1200.0)).await.unwrap();
        store.save_day(today, &record_with(100.0)).await.unwrap();

        let trend = build_trend_at(today, &record_with(750.0), &store).unwrap();
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[4].calories, 1200.0);
        assert_eq!(trend[6].calories, 750.0);
    }

    #[tokio::test]
    async fn window_crosses_month_and_year() {
        let data = TestData::new();
        let store = data.open(Locale::Hungarian).await;
        let today = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let trend = build_trend_at(today, &DayRecord::default(), &store).unwrap();
        // 2025-12-27 is a Saturday.
        assert_eq!(trend[0].label, "Szo");
        assert_eq!(trend[6].label, "P");
    }

    #[tokio::test]
    async fn window_before_first_calendar_day_is_an_error() {
        let data = TestData::new();
        let store = data.open(Locale::English).await;
        let result = build_trend_at(NaiveDate::MIN, &DayRecord::default(), &store);
        assert!(matches!(result, Err(TrackerError::DateOutOfRange)));

        let earliest = window_day(NaiveDate::MIN, 0).unwrap();
        assert!(window_day(earliest, WINDOW_DAYS - 1).is_err());
        let first_full = NaiveDate::MIN.checked_add_days(Days::new(WINDOW_DAYS - 1)).unwrap();
        assert_eq!(build_trend_at(first_full, &DayRecord::default(), &store).unwrap().len(), 7);
    }
}
