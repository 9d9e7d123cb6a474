//! Analytics module for gymtrack
//!
//! Turns workout and health rows into dashboard data:
//! - [`window`]: period tokens to date windows, and rolling comparison ranges
//! - [`buckets`]: ordered day/month buckets for a window
//! - [`aggregate`]: folding rows into buckets, weekday distribution
//! - [`streaks`]: consecutive-day streaks and milestones
//! - [`summary`]: percent change, averages, program progress, rankings
//! - [`dashboard`]: reports that fetch rows and run them through the above
//!
//! Everything except [`dashboard`] is pure: it takes rows that were already
//! fetched and allocates fresh state per call.

pub mod aggregate;
pub mod buckets;
pub mod dashboard;
pub mod streaks;
pub mod summary;
pub mod window;

pub use aggregate::{weekday_distribution, HealthPoint, WeekdayLoad, WorkoutPoint};
pub use buckets::{build_buckets, bucket_key, Bucket, LabelMode, Timeline};
pub use dashboard::{
    generate_dashboard, generate_dashboard_now, generate_health_timeline,
    generate_workout_timeline, member_streak, program_weekday_distribution, DashboardReport,
    StreakReport, TimelineReport,
};
pub use streaks::{compute_streak, milestones, Milestone, Streak, MILESTONE_DAYS};
pub use summary::{
    average_minutes, compose_summary, percent_change, DashboardSummary, PeriodMetrics,
    ProgramProgress, Ranked, TrendComparison,
};
pub use window::{period_range, resolve, resolve_now, DateWindow, Granularity, Period, PeriodRange};
