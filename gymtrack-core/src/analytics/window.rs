//! Date windows for analytics periods.
//!
//! A [`Period`] token resolves to a canonical inclusive date window plus the
//! bucket granularity used to chart it. All arithmetic happens on UTC
//! calendar dates so bucket boundaries never drift with a server timezone.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ProgramWindow;

/// Named time scope for analytics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    /// The program's own start/end dates
    Program,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::Program => "program",
        }
    }

    /// Length in days of the rolling window used for period-over-period
    /// comparison. `None` for [`Period::Program`].
    pub fn rolling_days(&self) -> Option<i64> {
        match self {
            Period::Day => Some(1),
            Period::Week => Some(7),
            Period::Month => Some(30),
            Period::Year => Some(365),
            Period::Program => None,
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "program" => Ok(Period::Program),
            other => Err(Error::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

/// A resolved inclusive window `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub label: String,
}

impl DateWindow {
    /// Number of calendar days covered (0 for an inverted window).
    pub fn num_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolve a period into its window, relative to `today`.
///
/// `program` is only consulted for [`Period::Program`], which needs both
/// of the program's dates.
pub fn resolve(
    period: Period,
    program: Option<&ProgramWindow>,
    today: NaiveDate,
) -> Result<DateWindow> {
    let window = match period {
        Period::Day => DateWindow {
            start: today,
            end: today,
            granularity: Granularity::Day,
            label: "Today".to_string(),
        },
        Period::Week => DateWindow {
            start: today - Duration::days(6),
            end: today,
            granularity: Granularity::Day,
            label: "Last 7 Days".to_string(),
        },
        Period::Month => DateWindow {
            start: month_start(today),
            end: month_end(today)?,
            granularity: Granularity::Day,
            label: today.format("%B %Y").to_string(),
        },
        Period::Year => DateWindow {
            start: year_day(today.year(), 1, 1)?,
            end: year_day(today.year(), 12, 31)?,
            granularity: Granularity::Month,
            label: today.year().to_string(),
        },
        Period::Program => {
            let (start, end) = program.and_then(ProgramWindow::bounds).ok_or_else(|| {
                Error::InvalidWindow(
                    "program period requires both start_date and end_date".to_string(),
                )
            })?;
            DateWindow {
                start,
                end,
                granularity: Granularity::Month,
                label: "Program".to_string(),
            }
        }
    };

    tracing::debug!(
        period = %period,
        start = %window.start,
        end = %window.end,
        "Resolved date window"
    );

    Ok(window)
}

/// Resolve against the current UTC date.
pub fn resolve_now(period: Period, program: Option<&ProgramWindow>) -> Result<DateWindow> {
    resolve(period, program, Utc::now().date_naive())
}

/// A pair of equal-length windows: `current` ends today, `previous`
/// ends the day before `current` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRange {
    pub current: (NaiveDate, NaiveDate),
    pub previous: (NaiveDate, NaiveDate),
}

/// Rolling current/previous windows for period-over-period comparison.
pub fn period_range(period: Period, today: NaiveDate) -> Result<PeriodRange> {
    let days = period.rolling_days().ok_or_else(|| {
        Error::InvalidPeriod(format!(
            "{} has no period-over-period comparison",
            period
        ))
    })?;

    let current_start = today - Duration::days(days - 1);
    let previous_end = current_start - Duration::days(1);
    let previous_start = previous_end - Duration::days(days - 1);

    Ok(PeriodRange {
        current: (current_start, today),
        previous: (previous_start, previous_end),
    })
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn month_end(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    Ok(year_day(year, month, 1)? - Duration::days(1))
}

fn year_day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::InvalidWindow(format!("date out of range: {}-{:02}-{:02}", year, month, day))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("program".parse::<Period>().unwrap(), Period::Program);
        assert!(matches!(
            "fortnight".parse::<Period>(),
            Err(Error::InvalidPeriod(token)) if token == "fortnight"
        ));
        assert!("Week".parse::<Period>().is_err());
    }

    #[test]
    fn test_resolve_week() {
        let window = resolve(Period::Week, None, date(2024, 3, 10)).unwrap();
        assert_eq!(window.start, date(2024, 3, 4));
        assert_eq!(window.end, date(2024, 3, 10));
        assert_eq!(window.granularity, Granularity::Day);
        assert_eq!(window.label, "Last 7 Days");
        assert_eq!(window.num_days(), 7);
    }

    #[test]
    fn test_resolve_month_leap_february() {
        let window = resolve(Period::Month, None, date(2024, 2, 14)).unwrap();
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.granularity, Granularity::Day);
        assert_eq!(window.label, "February 2024");
    }

    #[test]
    fn test_resolve_month_december() {
        let window = resolve(Period::Month, None, date(2023, 12, 31)).unwrap();
        assert_eq!(window.start, date(2023, 12, 1));
        assert_eq!(window.end, date(2023, 12, 31));
    }

    #[test]
    fn test_resolve_year() {
        for today in [date(2025, 1, 1), date(2025, 7, 19), date(2025, 12, 31)] {
            let window = resolve(Period::Year, None, today).unwrap();
            assert_eq!(window.start, date(2025, 1, 1));
            assert_eq!(window.end, date(2025, 12, 31));
            assert_eq!(window.granularity, Granularity::Month);
            assert_eq!(window.label, "2025");
        }
    }

    #[test]
    fn test_resolve_program() {
        let program = ProgramWindow {
            program_id: "p1".to_string(),
            start_date: Some(date(2024, 1, 15)),
            end_date: Some(date(2024, 4, 15)),
        };
        let window = resolve(Period::Program, Some(&program), date(2030, 1, 1)).unwrap();
        assert_eq!(window.start, date(2024, 1, 15));
        assert_eq!(window.end, date(2024, 4, 15));
        assert_eq!(window.granularity, Granularity::Month);
    }

    #[test]
    fn test_resolve_program_missing_dates() {
        let program = ProgramWindow {
            program_id: "p1".to_string(),
            start_date: Some(date(2024, 1, 15)),
            end_date: None,
        };
        let today = date(2024, 2, 1);
        assert!(matches!(
            resolve(Period::Program, Some(&program), today),
            Err(Error::InvalidWindow(_))
        ));
        assert!(matches!(
            resolve(Period::Program, None, today),
            Err(Error::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_resolve_day() {
        let window = resolve(Period::Day, None, date(2024, 5, 5)).unwrap();
        assert_eq!(window.start, window.end);
        assert_eq!(window.num_days(), 1);
        assert!(window.contains(date(2024, 5, 5)));
        assert!(!window.contains(date(2024, 5, 6)));
    }

    #[test]
    fn test_period_range_week() {
        let range = period_range(Period::Week, date(2024, 3, 14)).unwrap();
        assert_eq!(range.current, (date(2024, 3, 8), date(2024, 3, 14)));
        assert_eq!(range.previous, (date(2024, 3, 1), date(2024, 3, 7)));
    }

    #[test]
    fn test_period_range_equal_lengths() {
        let today = date(2024, 3, 1);
        for period in [Period::Day, Period::Week, Period::Month, Period::Year] {
            let range = period_range(period, today).unwrap();
            let current_len = (range.current.1 - range.current.0).num_days();
            let previous_len = (range.previous.1 - range.previous.0).num_days();
            assert_eq!(current_len, previous_len, "{}", period);
            assert_eq!((range.current.0 - range.previous.1).num_days(), 1);
            assert_eq!(range.current.1, today);
        }
    }

    #[test]
    fn test_period_range_day() {
        let range = period_range(Period::Day, date(2024, 1, 1)).unwrap();
        assert_eq!(range.current, (date(2024, 1, 1), date(2024, 1, 1)));
        assert_eq!(range.previous, (date(2023, 12, 31), date(2023, 12, 31)));
    }

    #[test]
    fn test_period_range_rejects_program() {
        assert!(matches!(
            period_range(Period::Program, date(2024, 1, 1)),
            Err(Error::InvalidPeriod(_))
        ));
    }
}
