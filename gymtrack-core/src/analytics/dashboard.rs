//! Dashboard, timeline, streak and distribution reports.
//!
//! Each report fetches the rows its window needs from the [`Database`] and
//! runs them through the engine: resolve the window, build buckets, fold
//! rows, compose the summary.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use super::aggregate::{weekday_distribution, HealthPoint, WeekdayLoad, WorkoutPoint};
use super::buckets::{LabelMode, Timeline};
use super::streaks::{compute_streak, milestones, Milestone, Streak};
use super::summary::{compose_summary, DashboardSummary, SummaryInputs};
use super::window::{period_range, resolve, DateWindow, Granularity, Period};
use crate::config::AnalyticsConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::Program;

/// Full dashboard for one program and period.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub program_id: String,
    pub program_name: String,
    pub period: Period,
    pub window: DateWindow,
    pub summary: DashboardSummary,
    pub timeline: Vec<WorkoutPoint>,
    /// All-time workouts per weekday
    pub weekday_distribution: Vec<WeekdayLoad>,
}

/// Bucketed chart points for one window.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport<P> {
    pub label: String,
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<P>,
}

/// A member's streaks and milestones within a program.
#[derive(Debug, Clone, Serialize)]
pub struct StreakReport {
    pub member_id: String,
    #[serde(flatten)]
    pub streak: Streak,
    pub last_active: Option<NaiveDate>,
    pub milestones: Vec<Milestone>,
}

fn load_program(db: &Database, program_id: &str) -> Result<Program> {
    db.get_program(program_id)?
        .ok_or_else(|| Error::ProgramNotFound(program_id.to_string()))
}

fn workout_timeline(
    db: &Database,
    program: &Program,
    period: Period,
    today: NaiveDate,
) -> Result<(DateWindow, Timeline)> {
    let window = resolve(period, Some(&program.window()), today)?;
    let mut timeline = Timeline::new(&window, LabelMode::for_period(period));
    let rows = db.workout_rows(&program.id, window.start, window.end)?;
    timeline.add_workouts(&rows);
    Ok((window, timeline))
}

/// Generate the dashboard for a program.
pub fn generate_dashboard(
    db: &Database,
    program_id: &str,
    period: Period,
    config: &AnalyticsConfig,
    today: NaiveDate,
) -> Result<DashboardReport> {
    let program = load_program(db, program_id)?;
    let (window, timeline) = workout_timeline(db, &program, period, today)?;

    let window_metrics = db.period_metrics(&program.id, window.start, window.end)?;

    // Program mode has no equal-length predecessor to compare against.
    let comparison = match period_range(period, today) {
        Ok(range) if config.include_trends => {
            let current = db.period_metrics(&program.id, range.current.0, range.current.1)?;
            let previous = db.period_metrics(&program.id, range.previous.0, range.previous.1)?;
            Some((current, previous))
        }
        Ok(_) | Err(Error::InvalidPeriod(_)) => None,
        Err(e) => return Err(e),
    };

    let inputs = SummaryInputs {
        window: window_metrics,
        comparison,
        total_members: db.count_members(&program.id)?,
        program_bounds: program.window().bounds(),
        performers: db.member_rankings(&program.id, window.start, window.end)?,
        workout_types: db.workout_type_rankings(&program.id, window.start, window.end)?,
    };
    let summary = compose_summary(
        inputs,
        today,
        config.top_performers,
        config.top_workout_types,
    );

    let all_rows = db.all_workout_rows(&program.id)?;

    tracing::info!(
        program_id = %program.id,
        period = %period,
        workouts = summary.totals.workouts,
        buckets = timeline.len(),
        "Generated dashboard"
    );

    Ok(DashboardReport {
        program_id: program.id.clone(),
        program_name: program.name.clone(),
        period,
        timeline: timeline.workout_points(),
        weekday_distribution: weekday_distribution(&all_rows),
        window,
        summary,
    })
}

/// Workout chart points for a program and period.
pub fn generate_workout_timeline(
    db: &Database,
    program_id: &str,
    period: Period,
    today: NaiveDate,
) -> Result<TimelineReport<WorkoutPoint>> {
    let program = load_program(db, program_id)?;
    let (window, timeline) = workout_timeline(db, &program, period, today)?;

    Ok(TimelineReport {
        label: window.label,
        granularity: window.granularity,
        start: window.start,
        end: window.end,
        points: timeline.workout_points(),
    })
}

/// Sleep and food-quality chart points for a program and period.
pub fn generate_health_timeline(
    db: &Database,
    program_id: &str,
    period: Period,
    today: NaiveDate,
) -> Result<TimelineReport<HealthPoint>> {
    let program = load_program(db, program_id)?;
    let window = resolve(period, Some(&program.window()), today)?;
    let mut timeline = Timeline::new(&window, LabelMode::for_period(period));
    let rows = db.health_rows(&program.id, window.start, window.end)?;
    timeline.add_health(&rows);

    Ok(TimelineReport {
        label: window.label,
        granularity: window.granularity,
        start: window.start,
        end: window.end,
        points: timeline.health_points(),
    })
}

/// Streaks for one member in a program.
pub fn member_streak(db: &Database, program_id: &str, member_id: &str) -> Result<StreakReport> {
    load_program(db, program_id)?;
    if db.get_member(member_id)?.is_none() {
        return Err(Error::MemberNotFound(member_id.to_string()));
    }

    let dates = db.member_activity_dates(program_id, member_id)?;
    let last_active = dates.last().copied();
    let streak = compute_streak(dates);

    Ok(StreakReport {
        member_id: member_id.to_string(),
        milestones: milestones(&streak),
        streak,
        last_active,
    })
}

/// All-time workouts per weekday for a program.
pub fn program_weekday_distribution(db: &Database, program_id: &str) -> Result<Vec<WeekdayLoad>> {
    let program = load_program(db, program_id)?;
    let rows = db.all_workout_rows(&program.id)?;
    Ok(weekday_distribution(&rows))
}

/// [`generate_dashboard`] for the current UTC date.
pub fn generate_dashboard_now(
    db: &Database,
    program_id: &str,
    period: Period,
    config: &AnalyticsConfig,
) -> Result<DashboardReport> {
    generate_dashboard(db, program_id, period, config, Utc::now().date_naive())
}
