//! Folding log rows into timeline buckets.
//!
//! Rows whose date has no bucket in the timeline are dropped without error;
//! callers fetch rows for the resolved window, so anything outside it was
//! over-fetched.

use chrono::{Datelike, Weekday};
use serde::Serialize;

use super::buckets::Timeline;
use crate::types::{HealthLogRow, WorkoutLogRow};

/// Workout chart point for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutPoint {
    pub date: String,
    pub label: String,
    pub workouts: i64,
    pub minutes: i64,
    pub active_members: usize,
}

/// Health chart point for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthPoint {
    pub date: String,
    pub label: String,
    pub sleep_avg: f64,
    pub food_avg: i64,
}

impl Timeline {
    /// Accumulate workout rows. Returns how many rows landed in a bucket.
    pub fn add_workouts<'a, I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = &'a WorkoutLogRow>,
    {
        let mut folded = 0;
        let mut dropped = 0;

        for row in rows {
            match self.bucket_for_mut(row.log_date) {
                Some(bucket) => {
                    bucket.workout_count += 1;
                    bucket.duration_sum += i64::from(row.duration_minutes);
                    bucket.member_ids.insert(row.member_id.clone());
                    folded += 1;
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(folded, dropped, "Dropped workout rows outside timeline");
        }
        folded
    }

    /// Accumulate health rows. Missing or non-finite values are skipped
    /// per field. Returns how many rows landed in a bucket.
    pub fn add_health<'a, I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = &'a HealthLogRow>,
    {
        let mut folded = 0;
        let mut dropped = 0;

        for row in rows {
            let Some(bucket) = self.bucket_for_mut(row.log_date) else {
                dropped += 1;
                continue;
            };

            if let Some(sleep) = row.sleep_hours.filter(|s| s.is_finite()) {
                bucket.sleep_sum += sleep;
                bucket.sleep_count += 1;
            }
            if let Some(food) = row.food_quality {
                bucket.food_sum += i64::from(food);
                bucket.food_count += 1;
            }
            folded += 1;
        }

        if dropped > 0 {
            tracing::debug!(folded, dropped, "Dropped health rows outside timeline");
        }
        folded
    }

    /// Workout points in bucket order.
    pub fn workout_points(&self) -> Vec<WorkoutPoint> {
        self.buckets()
            .iter()
            .map(|b| WorkoutPoint {
                date: b.key.clone(),
                label: b.label.clone(),
                workouts: b.workout_count,
                minutes: b.duration_sum,
                active_members: b.active_members(),
            })
            .collect()
    }

    /// Health points in bucket order.
    pub fn health_points(&self) -> Vec<HealthPoint> {
        self.buckets()
            .iter()
            .map(|b| HealthPoint {
                date: b.key.clone(),
                label: b.label.clone(),
                sleep_avg: b.sleep_avg(),
                food_avg: b.food_avg(),
            })
            .collect()
    }
}

/// Workout load for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayLoad {
    pub day: &'static str,
    pub workouts: i64,
    pub minutes: i64,
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Workouts and minutes per weekday over every row given, Sunday first.
///
/// This is an all-time rollup: it does not look at any timeline window.
pub fn weekday_distribution<'a, I>(rows: I) -> Vec<WeekdayLoad>
where
    I: IntoIterator<Item = &'a WorkoutLogRow>,
{
    let mut totals = [(0i64, 0i64); 7];
    for row in rows {
        let slot = &mut totals[row.log_date.weekday().num_days_from_sunday() as usize];
        slot.0 += 1;
        slot.1 += i64::from(row.duration_minutes);
    }

    WEEKDAYS
        .iter()
        .zip(totals)
        .map(|(day, (workouts, minutes))| WeekdayLoad {
            day: weekday_name(*day),
            workouts,
            minutes,
        })
        .collect()
}
