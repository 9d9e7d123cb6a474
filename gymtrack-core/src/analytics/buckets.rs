//! Time buckets for charting a resolved window.
//!
//! A [`Timeline`] is an ordered, gapless run of [`Bucket`]s, one per
//! calendar day or calendar month. Buckets are keyed by [`bucket_key`],
//! which is also how log rows find their bucket during aggregation.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::window::{DateWindow, Granularity, Period};

/// How bucket labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Abbreviated weekday ("Mon")
    Weekday,
    /// Day of month ("7")
    MonthDay,
    /// Abbreviated month ("Jan")
    Month,
}

impl LabelMode {
    /// The label mode a chart for `period` uses.
    pub fn for_period(period: Period) -> Self {
        match period {
            Period::Day | Period::Week => LabelMode::Weekday,
            Period::Month => LabelMode::MonthDay,
            Period::Year | Period::Program => LabelMode::Month,
        }
    }

    fn render(&self, date: NaiveDate) -> String {
        match self {
            LabelMode::Weekday => date.format("%a").to_string(),
            LabelMode::MonthDay => date.day().to_string(),
            LabelMode::Month => date.format("%b").to_string(),
        }
    }
}

/// Key of the bucket `date` falls in: `YYYY-MM-DD` or `YYYY-MM`.
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Month => date.format("%Y-%m").to_string(),
    }
}

/// One time slice with its accumulators.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub key: String,
    pub label: String,
    /// First calendar day of the slice
    pub start: NaiveDate,

    // Workout accumulators
    pub workout_count: i64,
    pub duration_sum: i64,
    pub member_ids: HashSet<String>,

    // Health accumulators
    pub sleep_sum: f64,
    pub sleep_count: i64,
    pub food_sum: i64,
    pub food_count: i64,
}

impl Bucket {
    fn new(start: NaiveDate, granularity: Granularity, label_mode: LabelMode) -> Self {
        Self {
            key: bucket_key(start, granularity),
            label: label_mode.render(start),
            start,
            ..Default::default()
        }
    }

    /// Distinct members who logged a workout in this bucket.
    pub fn active_members(&self) -> usize {
        self.member_ids.len()
    }

    /// Average sleep, one decimal place. 0 when nothing was logged.
    pub fn sleep_avg(&self) -> f64 {
        if self.sleep_count == 0 {
            0.0
        } else {
            super::summary::round1(self.sleep_sum / self.sleep_count as f64)
        }
    }

    /// Average food quality rounded to the nearest integer. 0 when nothing was logged.
    pub fn food_avg(&self) -> i64 {
        if self.food_count == 0 {
            0
        } else {
            (self.food_sum as f64 / self.food_count as f64).round() as i64
        }
    }
}

/// Build the empty buckets covering `[start, end]` in ascending order.
///
/// An inverted window yields no buckets.
pub fn build_buckets(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
    label_mode: LabelMode,
) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if start > end {
        return buckets;
    }

    match granularity {
        Granularity::Day => {
            let mut day = start;
            while day <= end {
                buckets.push(Bucket::new(day, granularity, label_mode));
                day += Duration::days(1);
            }
        }
        Granularity::Month => {
            let last = first_of_month(end);
            let mut month = Some(first_of_month(start));
            while let Some(current) = month.filter(|m| *m <= last) {
                buckets.push(Bucket::new(current, granularity, label_mode));
                month = current.checked_add_months(Months::new(1));
            }
        }
    }

    buckets
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Ordered buckets for one window, with O(1) key lookup.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub granularity: Granularity,
    pub label: String,
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl Timeline {
    /// Build the empty timeline for a resolved window.
    pub fn new(window: &DateWindow, label_mode: LabelMode) -> Self {
        let buckets = build_buckets(window.start, window.end, window.granularity, label_mode);
        let index = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.key.clone(), i))
            .collect();

        Self {
            granularity: window.granularity,
            label: window.label.clone(),
            buckets,
            index,
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The bucket `date` belongs to, if it is inside the timeline.
    pub(crate) fn bucket_for_mut(&mut self, date: NaiveDate) -> Option<&mut Bucket> {
        let idx = *self.index.get(&bucket_key(date, self.granularity))?;
        self.buckets.get_mut(idx)
    }
}
