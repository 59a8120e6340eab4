//! Timeline Layout
//!
//! Turns a set of dated items into proportional bar positions on a
//! fixed-width timeline, plus one calendar tick per day.
//!
//! Positions are fractions of the full window and are deliberately not
//! clamped: an item outside the window (e.g. the window is stale relative to
//! newer data) simply renders outside `[0, 1]`.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::dates::{self, MILLIS_PER_DAY};
use crate::locale::Locale;
use crate::models::DatedItem;

/// The date span covering a set of items; the coordinate basis for layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Inclusive span in whole days, never below 1
    pub total_days: u32,
}

impl TimelineWindow {
    fn span_millis(&self) -> f64 {
        self.total_days as f64 * MILLIS_PER_DAY as f64
    }

    /// Fraction of the window at which an instant falls
    pub fn offset_of(&self, instant: &DateTime<Utc>) -> f64 {
        (*instant - self.start).num_milliseconds() as f64 / self.span_millis()
    }
}

/// Compute the window for the current item set.
///
/// Returns None for an empty list; the renderer shows its empty state instead.
pub fn compute_window(items: &[DatedItem]) -> Option<TimelineWindow> {
    let start = items.iter().map(|item| item.start_time).min()?;
    let end = items.iter().map(|item| item.end_time).max()?;

    let diff = (end - start).num_milliseconds();
    let whole_days = if diff <= 0 {
        0
    } else {
        (diff + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    };
    let total_days = u32::try_from(whole_days + 1).unwrap_or(u32::MAX);

    Some(TimelineWindow {
        start,
        end,
        total_days,
    })
}

/// Horizontal placement of one bar, as fractions of the window width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPosition {
    pub left_fraction: f64,
    pub width_fraction: f64,
}

impl ItemPosition {
    pub fn left_percent(&self) -> f64 {
        self.left_fraction * 100.0
    }

    pub fn width_percent(&self) -> f64 {
        self.width_fraction * 100.0
    }

    pub fn right_fraction(&self) -> f64 {
        self.left_fraction + self.width_fraction
    }
}

pub fn compute_item_position(item: &DatedItem, window: &TimelineWindow) -> ItemPosition {
    let span_days = window.total_days as f64;
    ItemPosition {
        left_fraction: dates::days_between(&window.start, &item.start_time) / span_days,
        width_fraction: dates::days_between(&item.start_time, &item.end_time) / span_days,
    }
}

/// `window.start <= date <= window.end`; decides whether the "today" line is drawn
pub fn is_within_window(date: &DateTime<Utc>, window: &TimelineWindow) -> bool {
    window.start <= *date && *date <= window.end
}

/// Position of the "today" line, if today falls inside the window
pub fn today_offset(now: &DateTime<Utc>, window: &TimelineWindow) -> Option<f64> {
    is_within_window(now, window).then(|| window.offset_of(now))
}

/// One calendar column of the timeline header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTick {
    pub day_index: u32,
    pub date: NaiveDate,
    pub is_month_start: bool,
    /// Month name, present on the first day of a month
    pub label: Option<&'static str>,
    /// Day number, present on every 5th day of the month
    pub day_label: Option<u32>,
}

impl DayTick {
    pub fn offset_fraction(&self, window: &TimelineWindow) -> f64 {
        self.day_index as f64 / window.total_days as f64
    }
}

/// Lazily yields exactly `total_days` ticks. Cloning restarts from the same point.
#[derive(Debug, Clone)]
pub struct DayTicks {
    first_day: NaiveDate,
    next_index: u32,
    total_days: u32,
    locale: Locale,
}

impl Iterator for DayTicks {
    type Item = DayTick;

    fn next(&mut self) -> Option<DayTick> {
        if self.next_index >= self.total_days {
            return None;
        }
        let day_index = self.next_index;
        let date = self
            .first_day
            .checked_add_days(Days::new(u64::from(day_index)))?;
        self.next_index += 1;

        let is_month_start = date.day() == 1;
        Some(DayTick {
            day_index,
            date,
            is_month_start,
            label: is_month_start.then(|| self.locale.month_name(date.month())),
            day_label: (date.day() % 5 == 0).then(|| date.day()),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_days - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayTicks {}

pub fn generate_day_ticks(window: &TimelineWindow, locale: Locale) -> DayTicks {
    DayTicks {
        first_day: window.start.date_naive(),
        next_index: 0,
        total_days: window.total_days,
        locale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item_on_days;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_list_has_no_window() {
        assert!(compute_window(&[]).is_none());
    }

    #[test]
    fn test_single_day_items_still_span_one_day() {
        let items = vec![
            item_on_days(1, "a", day(2024, 5, 1), day(2024, 5, 1)),
            item_on_days(2, "b", day(2024, 5, 1), day(2024, 5, 1)),
        ];
        let window = compute_window(&items).unwrap();
        assert_eq!(window.total_days, 1);
        let pos = compute_item_position(&items[0], &window);
        assert_eq!(pos.left_fraction, 0.0);
        assert_eq!(pos.width_fraction, 0.0);
    }

    #[test]
    fn test_partial_days_round_up() {
        let mut item = item_on_days(1, "a", day(2024, 5, 1), day(2024, 5, 2));
        item.end_time = item.end_time + chrono::Duration::hours(3);
        let window = compute_window(&[item]).unwrap();
        assert_eq!(window.total_days, 3);
    }

    #[test]
    fn test_inverted_item_does_not_panic() {
        let item = item_on_days(1, "backwards", day(2024, 5, 10), day(2024, 5, 1));
        let window = compute_window(std::slice::from_ref(&item)).unwrap();
        assert_eq!(window.total_days, 1);
        let pos = compute_item_position(&item, &window);
        assert!(pos.width_fraction < 0.0);
    }

    #[test]
    fn test_items_inside_window_stay_inside() {
        let items = vec![
            item_on_days(1, "a", day(2024, 1, 3), day(2024, 2, 10)),
            item_on_days(2, "b", day(2024, 1, 20), day(2024, 1, 21)),
            item_on_days(3, "c", day(2023, 12, 30), day(2024, 3, 1)),
        ];
        let window = compute_window(&items).unwrap();
        for item in &items {
            let pos = compute_item_position(item, &window);
            assert!(pos.left_fraction >= 0.0);
            assert!(pos.right_fraction() <= 1.0);
        }
    }

    #[test]
    fn test_out_of_window_item_is_not_clamped() {
        let items = vec![item_on_days(1, "a", day(2024, 3, 1), day(2024, 3, 10))];
        let window = compute_window(&items).unwrap();
        let late = item_on_days(2, "late", day(2024, 3, 20), day(2024, 3, 25));
        let pos = compute_item_position(&late, &window);
        assert!(approx(pos.left_fraction, 19.0 / 10.0));
    }

    #[test]
    fn test_ticks_count_and_month_starts() {
        let items = vec![item_on_days(1, "a", day(2024, 1, 20), day(2024, 4, 5))];
        let window = compute_window(&items).unwrap();
        let ticks: Vec<DayTick> = generate_day_ticks(&window, Locale::En).collect();
        assert_eq!(ticks.len(), window.total_days as usize);
        assert_eq!(generate_day_ticks(&window, Locale::En).len(), ticks.len());

        let month_starts: Vec<&str> = ticks.iter().filter_map(|t| t.label).collect();
        assert_eq!(month_starts, vec!["Feb", "Mar", "Apr"]);
        assert_eq!(ticks.iter().filter(|t| t.is_month_start).count(), 3);
    }

    #[test]
    fn test_day_labels_every_fifth_day() {
        let items = vec![item_on_days(1, "a", day(2024, 2, 26), day(2024, 3, 11))];
        let window = compute_window(&items).unwrap();
        let labelled: Vec<u32> = generate_day_ticks(&window, Locale::Zh)
            .filter_map(|t| t.day_label)
            .collect();
        assert_eq!(labelled, vec![5, 10]);
        let first_of_march = generate_day_ticks(&window, Locale::Zh)
            .find(|t| t.is_month_start)
            .unwrap();
        assert_eq!(first_of_march.label, Some("三月"));
        assert_eq!(first_of_march.day_index, 4);
    }

    #[test]
    fn test_ticks_are_restartable() {
        let items = vec![item_on_days(1, "a", day(2024, 2, 26), day(2024, 3, 2))];
        let window = compute_window(&items).unwrap();
        let mut ticks = generate_day_ticks(&window, Locale::En);
        ticks.next();
        let resumed = ticks.clone();
        assert_eq!(ticks.count(), resumed.count());
        assert_eq!(generate_day_ticks(&window, Locale::En).count(), 6);
    }

    #[test]
    fn test_today_marker() {
        let items = vec![item_on_days(1, "a", day(2024, 3, 1), day(2024, 3, 11))];
        let window = compute_window(&items).unwrap();
        let inside = crate::dates::start_of_day(day(2024, 3, 6));
        let outside = crate::dates::start_of_day(day(2024, 3, 12));
        assert!(is_within_window(&inside, &window));
        assert!(is_within_window(&window.end, &window));
        assert!(!is_within_window(&outside, &window));
        assert!(approx(today_offset(&inside, &window).unwrap(), 5.0 / 11.0));
        assert!(today_offset(&outside, &window).is_none());
    }
}
