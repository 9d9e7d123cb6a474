//! Core domain types for gymtrack
//!
//! These are plain value rows. The analytics engine only reads them; the
//! database layer is the only place that creates them from storage.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Member** | A person with an account who can join programs |
//! | **Program** | A fitness program with optional start/end dates |
//! | **Enrollment** | A member's participation in a program, with a role |
//! | **Workout log** | Minutes spent on one workout type by one member on one day |
//! | **Health log** | Sleep and food-quality entry for one member on one day |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest accepted sleep value (hours per day).
pub const MAX_SLEEP_HOURS: f64 = 24.0;

/// Accepted food-quality range (inclusive).
pub const FOOD_QUALITY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

// ============================================
// Members & Programs
// ============================================

/// A member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the member is a global administrator
    pub is_admin: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A fitness program members can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// First day of the program
    pub start_date: Option<NaiveDate>,
    /// Last day of the program
    pub end_date: Option<NaiveDate>,
    /// When the program was created
    pub created_at: DateTime<Utc>,
}

impl Program {
    /// The date window of this program.
    pub fn window(&self) -> ProgramWindow {
        ProgramWindow {
            program_id: self.id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Start/end dates of a program. "program" period mode requires both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramWindow {
    pub program_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProgramWindow {
    /// Both dates, if set.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }
}

// ============================================
// Log rows
// ============================================

/// One workout entry: minutes of one workout type by one member on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLogRow {
    pub program_id: String,
    pub member_id: String,
    /// Workout type label (e.g. "Cardio", "Strength")
    pub workout_type: String,
    pub log_date: NaiveDate,
    pub duration_minutes: u32,
}

/// One health entry for a member on a day. Either value may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogRow {
    pub program_id: String,
    pub member_id: String,
    pub log_date: NaiveDate,
    /// Hours of sleep, one decimal place
    pub sleep_hours: Option<f64>,
    /// Food quality score 1-5
    pub food_quality: Option<i32>,
}

impl HealthLogRow {
    /// Check the values before they are stored.
    ///
    /// Sleep is rounded to one decimal place on success.
    pub fn validate(mut self) -> Result<Self> {
        if let Some(sleep) = self.sleep_hours {
            if !sleep.is_finite() {
                return Err(Error::NonFiniteValue {
                    field: "sleep_hours",
                });
            }
            if !(0.0..=MAX_SLEEP_HOURS).contains(&sleep) {
                return Err(Error::Validation(format!(
                    "sleep_hours must be between 0 and {}, got {}",
                    MAX_SLEEP_HOURS, sleep
                )));
            }
            self.sleep_hours = Some((sleep * 10.0).round() / 10.0);
        }

        if let Some(food) = self.food_quality {
            if !FOOD_QUALITY_RANGE.contains(&food) {
                return Err(Error::Validation(format!(
                    "food_quality must be between 1 and 5, got {}",
                    food
                )));
            }
        }

        Ok(self)
    }
}
