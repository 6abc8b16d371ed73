use crate::aggregate::{group_totals, total};
use crate::chart::{ChartLayout, ChartSurface};
use crate::drawer::{Drawer, Viewport};
use crate::errors::TrackerError;
use crate::models::{CalorieDataPoint, DayRecord, DayResponse, Entry};
use crate::storage::{date_key, Store};
use crate::trend::{build_trend_at, window_day, WINDOW_DAYS};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// The one editing session: which day is shown, its groups, and the drawer.
///
/// Every mutation is saved under `current_date` as it stands once the
/// mutation has been applied. Navigation switches the date first, then loads,
/// then saves, so a day's edits can never land under a neighbour's key.
#[derive(Debug)]
pub struct Tracker {
    store: Store,
    current_date: NaiveDate,
    record: DayRecord,
    drawer: Drawer,
}

impl Tracker {
    pub fn open(store: Store, today: NaiveDate) -> Self {
        let record = store.load_day(today);
        Self {
            store,
            current_date: today,
            record,
            drawer: Drawer::new(Viewport::default()),
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn record(&self) -> &DayRecord {
        &self.record
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    pub fn drawer_mut(&mut self) -> &mut Drawer {
        &mut self.drawer
    }

    pub fn total(&self) -> f64 {
        total(&self.record.groups)
    }

    pub fn day(&self) -> DayResponse {
        DayResponse {
            date: date_key(self.current_date),
            groups: self.record.groups.clone(),
            total: self.total(),
            group_totals: group_totals(&self.record.groups),
        }
    }

    pub async fn previous_day(&mut self) -> Result<(), TrackerError> {
        let date = self
            .current_date
            .checked_sub_days(Days::new(1))
            .ok_or(TrackerError::DateOutOfRange)?;
        self.go_to(date).await
    }

    pub async fn next_day(&mut self) -> Result<(), TrackerError> {
        let date = self
            .current_date
            .checked_add_days(Days::new(1))
            .ok_or(TrackerError::DateOutOfRange)?;
        self.go_to(date).await
    }

    /// Dates too close to the start of the calendar to hold a full trend
    /// window are rejected before anything changes.
    pub async fn go_to(&mut self, date: NaiveDate) -> Result<(), TrackerError> {
        window_day(date, WINDOW_DAYS - 1)?;
        debug!("navigating from {} to {}", self.current_date, date);
        self.current_date = date;
        self.record = self.store.load_day(date);
        self.save().await
    }

    pub async fn set_entry(&mut self, group: usize, entry: usize, raw: &str) -> Result<Entry, TrackerError> {
        let value = self.record.set_entry(group, entry, raw)?;
        self.save().await?;
        Ok(value)
    }

    pub async fn add_entry(&mut self, group: usize) -> Result<(), TrackerError> {
        self.record.add_entry(group)?;
        self.save().await
    }

    pub async fn remove_entry(&mut self, group: usize, entry: usize) -> Result<Entry, TrackerError> {
        let removed = self.record.remove_entry(group, entry)?;
        self.save().await?;
        Ok(removed)
    }

    pub fn ideal_calories(&self) -> Entry {
        self.store.ideal_calories()
    }

    pub async fn set_ideal_calories(&mut self, raw: &str) -> Result<Entry, TrackerError> {
        let ideal = Entry::parse(raw);
        self.store.set_ideal_calories(ideal).await?;
        Ok(ideal)
    }

    pub fn trend(&self) -> Result<Vec<CalorieDataPoint>, TrackerError> {
        build_trend_at(self.current_date, &self.record, &self.store)
    }

    pub fn chart(&self, surface: ChartSurface) -> Result<ChartLayout, TrackerError> {
        let points = self.trend()?;
        Ok(ChartLayout::compute(surface, &points, self.ideal_calories().value()))
    }

    async fn save(&mut self) -> Result<(), TrackerError> {
        self.store.save_day(self.current_date, &self.record).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::storage::test_support::TestData;

    async fn tracker(today: NaiveDate) -> (Tracker, TestData) {
        let data = TestData::new();
        let store = data.open(Locale::English).await;
        (Tracker::open(store, today), data)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn opens_on_template_for_fresh_day() {
        let (tracker, _data) = tracker(date(2026, 3, 10)).await;
        assert_eq!(tracker.record(), &tracker.store().template());
        assert_eq!(tracker.total(), 0.0);
        assert_eq!(tracker.day().date, "2026-03-10");
    }

    #[tokio::test]
    async fn edits_are_saved_under_current_date() {
        let (mut tracker, _data) = tracker(date(2026, 3, 10)).await;
        tracker.set_entry(0, 0, "400").await.unwrap();
        tracker.add_entry(0).await.unwrap();
        tracker.set_entry(0, 1, "50").await.unwrap();

        let stored = tracker.store().load_day(date(2026, 3, 10));
        assert_eq!(stored, *tracker.record());
        assert_eq!(tracker.total(), 450.0);
        assert_eq!(tracker.day().group_totals, vec![450.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn previous_then_next_returns_to_same_record() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        tracker.set_entry(1, 0, "700").await.unwrap();
        let before = tracker.record().clone();

        tracker.previous_day().await.unwrap();
        assert_eq!(tracker.current_date(), date(2026, 2, 28));
        assert_eq!(tracker.record(), &tracker.store().template());
        tracker.set_entry(2, 0, "90").await.unwrap();

        tracker.next_day().await.unwrap();
        assert_eq!(tracker.current_date(), date(2026, 3, 1));
        assert_eq!(tracker.record(), &before);
        assert_eq!(tracker.store().load_day(date(2026, 2, 28)).groups[2].numbers, vec![Entry::Value(90.0)]);
    }

    #[tokio::test]
    async fn navigation_rolls_over_year() {
        let (mut tracker, _data) = tracker(date(2025, 12, 31)).await;
        tracker.next_day().await.unwrap();
        assert_eq!(tracker.current_date(), date(2026, 1, 1));
        tracker.go_to(date(2024, 3, 1)).await.unwrap();
        tracker.previous_day().await.unwrap();
        assert_eq!(tracker.current_date(), date(2024, 2, 29));
    }

    #[tokio::test]
    async fn navigating_records_visited_days() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        tracker.previous_day().await.unwrap();
        tracker.previous_day().await.unwrap();
        assert_eq!(tracker.store().stored_days(), 2);
    }

    #[tokio::test]
    async fn bad_index_is_rejected_without_saving() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        let err = tracker.remove_entry(7, 0).await.unwrap_err();
        assert!(matches!(err, TrackerError::GroupOutOfRange(7)));
        assert_eq!(tracker.store().stored_days(), 0);
    }

    #[tokio::test]
    async fn trend_uses_live_total() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        tracker.set_entry(3, 0, "500").await.unwrap();
        let calories: Vec<f64> = tracker.trend().unwrap().iter().map(|p| p.calories).collect();
        assert_eq!(calories, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 500.0]);
    }

    #[tokio::test]
    async fn ideal_calories_write_through_and_scale_chart() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        assert_eq!(tracker.set_ideal_calories("2500").await.unwrap(), Entry::Value(2500.0));
        assert_eq!(tracker.chart(ChartSurface::default()).unwrap().scale_max, 2500.0);

        assert_eq!(tracker.set_ideal_calories("plenty").await.unwrap(), Entry::Blank);
        assert_eq!(tracker.chart(ChartSurface::default()).unwrap().scale_max, 1.0);
    }

    #[tokio::test]
    async fn dates_without_a_full_window_are_rejected() {
        let (mut tracker, _data) = tracker(date(2026, 3, 1)).await;
        let before = tracker.record().clone();

        let err = tracker.go_to(NaiveDate::MIN).await.unwrap_err();
        assert!(matches!(err, TrackerError::DateOutOfRange));
        assert_eq!(tracker.current_date(), date(2026, 3, 1));
        assert_eq!(tracker.record(), &before);

        let earliest = NaiveDate::MIN.checked_add_days(Days::new(WINDOW_DAYS - 1)).unwrap();
        tracker.go_to(earliest).await.unwrap();
        assert!(matches!(tracker.previous_day().await, Err(TrackerError::DateOutOfRange)));
        assert_eq!(tracker.current_date(), earliest);
        assert_eq!(tracker.trend().unwrap().len(), 7);
    }
}
