//! Summary math: period-over-period change, averages, program progress,
//! rankings, and the composed dashboard summary.

use chrono::NaiveDate;
use serde::Serialize;

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percent change from `previous` to `current`, one decimal place.
///
/// A zero (or non-finite) baseline reports 100 when there is any current
/// value and 0 otherwise.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        round1((current - previous) / previous * 100.0)
    }
}

/// Average minutes per log, rounded to the nearest minute.
pub fn average_minutes(duration_sum: i64, log_count: i64) -> i64 {
    if log_count == 0 {
        0
    } else {
        (duration_sum as f64 / log_count as f64).round() as i64
    }
}

/// Members with no activity in the period.
pub fn at_risk_members(total_members: i64, active_members: i64) -> i64 {
    (total_members - active_members).max(0)
}

/// A ranked entry (member or workout type) with its primary metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub id: String,
    pub name: String,
    pub workouts: i64,
    pub minutes: i64,
}

/// Keep the `n` entries with the most workouts.
///
/// The sort is stable, so ties keep the order the rows arrived in.
pub fn top_n(mut entries: Vec<Ranked>, n: usize) -> Vec<Ranked> {
    entries.sort_by(|a, b| b.workouts.cmp(&a.workouts));
    entries.truncate(n);
    entries
}

/// How far a program has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgramProgress {
    pub total_days: i64,
    pub elapsed_days: i64,
    pub remaining_days: i64,
    pub progress_percent: i64,
}

impl ProgramProgress {
    pub fn compute(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        let total_days = (end - start).num_days().max(0);
        let elapsed_days = if today > start {
            (today - start).num_days().min(total_days)
        } else {
            0
        };
        let remaining_days = (total_days - elapsed_days).max(0);
        let progress_percent = if total_days > 0 {
            (elapsed_days as f64 / total_days as f64 * 100.0).round() as i64
        } else {
            0
        };

        Self {
            total_days,
            elapsed_days,
            remaining_days,
            progress_percent,
        }
    }
}

/// Raw counts for one period, as returned by the row source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodMetrics {
    pub log_count: i64,
    pub duration_sum: i64,
    pub active_members: i64,
}

/// A metric with its change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub value: i64,
    pub change_pct: f64,
}

/// Average session length with its change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationSummary {
    pub avg_minutes: i64,
    pub change_pct: f64,
}

/// Current-vs-previous comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendComparison {
    pub workouts: Change,
    pub minutes: Change,
    pub active_members: Change,
    pub duration: DurationSummary,
    pub previous: PeriodMetrics,
}

impl TrendComparison {
    pub fn compute(current: &PeriodMetrics, previous: &PeriodMetrics) -> Self {
        let change = |c: i64, p: i64| Change {
            value: c,
            change_pct: percent_change(c as f64, p as f64),
        };

        // Averages are compared directly rather than derived from the totals.
        let current_avg = average_minutes(current.duration_sum, current.log_count);
        let previous_avg = average_minutes(previous.duration_sum, previous.log_count);

        Self {
            workouts: change(current.log_count, previous.log_count),
            minutes: change(current.duration_sum, previous.duration_sum),
            active_members: change(current.active_members, previous.active_members),
            duration: DurationSummary {
                avg_minutes: current_avg,
                change_pct: percent_change(current_avg as f64, previous_avg as f64),
            },
            previous: *previous,
        }
    }

    /// Format a delta for display (e.g. "+23%" or "-15%").
    pub fn format_delta(delta: f64) -> String {
        if delta >= 0.0 {
            format!("+{:.0}%", delta)
        } else {
            format!("{:.0}%", delta)
        }
    }
}

/// Headline numbers for the resolved window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub workouts: i64,
    pub minutes: i64,
    pub avg_minutes: i64,
    pub total_members: i64,
    pub active_members: i64,
    pub at_risk_members: i64,
}

impl Totals {
    pub fn compute(window: &PeriodMetrics, total_members: i64) -> Self {
        Self {
            workouts: window.log_count,
            minutes: window.duration_sum,
            avg_minutes: average_minutes(window.duration_sum, window.log_count),
            total_members,
            active_members: window.active_members,
            at_risk_members: at_risk_members(total_members, window.active_members),
        }
    }
}

/// The composed dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub trends: Option<TrendComparison>,
    pub progress: Option<ProgramProgress>,
    pub top_performers: Vec<Ranked>,
    pub top_workout_types: Vec<Ranked>,
}

/// Inputs for [`compose_summary`].
#[derive(Debug, Clone, Default)]
pub struct SummaryInputs {
    /// Counts over the resolved window
    pub window: PeriodMetrics,
    /// Rolling current/previous counts, when a comparison applies
    pub comparison: Option<(PeriodMetrics, PeriodMetrics)>,
    pub total_members: i64,
    /// Program start/end, when both are known
    pub program_bounds: Option<(NaiveDate, NaiveDate)>,
    pub performers: Vec<Ranked>,
    pub workout_types: Vec<Ranked>,
}

/// Assemble the dashboard summary.
pub fn compose_summary(
    inputs: SummaryInputs,
    today: NaiveDate,
    top_performers: usize,
    top_workout_types: usize,
) -> DashboardSummary {
    DashboardSummary {
        totals: Totals::compute(&inputs.window, inputs.total_members),
        trends: inputs
            .comparison
            .map(|(current, previous)| TrendComparison::compute(&current, &previous)),
        progress: inputs
            .program_bounds
            .map(|(start, end)| ProgramProgress::compute(start, end, today)),
        top_performers: top_n(inputs.performers, top_performers),
        top_workout_types: top_n(inputs.workout_types, top_workout_types),
    }
}
