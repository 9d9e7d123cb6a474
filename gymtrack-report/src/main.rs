//! gymtrack-report - fitness program dashboards from the command line
//!
//! Reads the local gymtrack database and prints dashboards, chart timelines,
//! member streaks and weekday distributions.
//!
//! Uses XDG Base Directory locations:
//! - Database: $XDG_DATA_HOME/gymtrack/gymtrack.db
//! - Config: $XDG_CONFIG_HOME/gymtrack/config.toml

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use gymtrack_core::analytics::{
    generate_dashboard, generate_health_timeline, generate_workout_timeline, member_streak,
    program_weekday_distribution, DashboardReport, Period, TrendComparison,
};
use gymtrack_core::{Config, Database};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "gymtrack-report")]
#[command(about = "Fitness program dashboards and stats")]
#[command(version)]
struct Args {
    /// Reference date as YYYY-MM-DD (default: today, UTC)
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard summary for a program
    Dashboard {
        /// Program id
        #[arg(long)]
        program: String,

        /// Period: day, week, month, year or program
        #[arg(long, default_value = "week")]
        period: String,

        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },

    /// Bucketed chart points as JSON
    Timeline {
        /// Program id
        #[arg(long)]
        program: String,

        /// Period: day, week, month, year or program
        #[arg(long, default_value = "week")]
        period: String,

        /// Series to chart: workouts or health
        #[arg(long, default_value = "workouts")]
        kind: String,
    },

    /// A member's streaks and milestones as JSON
    Streak {
        /// Program id
        #[arg(long)]
        program: String,

        /// Member id
        #[arg(long)]
        member: String,
    },

    /// All-time workouts per weekday as JSON
    Distribution {
        /// Program id
        #[arg(long)]
        program: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = gymtrack_core::logging::init(&config.logging).ok();

    let db_path = Config::database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    db.migrate().context("failed to run migrations")?;

    let today = match args.today.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", raw))?,
        None => Utc::now().date_naive(),
    };
    tracing::debug!(command = ?args.command, %today, "Running report");

    match args.command {
        Command::Dashboard {
            program,
            period,
            export,
        } => {
            let period = parse_period(&period)?;
            let report = generate_dashboard(&db, &program, period, &config.analytics, today)
                .context("failed to generate dashboard")?;
            match export.as_deref() {
                Some("json") => print_json(&report)?,
                Some("md") => print_markdown(&report),
                Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
                None => print_terminal(&report),
            }
        }
        Command::Timeline {
            program,
            period,
            kind,
        } => {
            let period = parse_period(&period)?;
            match kind.as_str() {
                "workouts" => print_json(
                    &generate_workout_timeline(&db, &program, period, today)
                        .context("failed to generate workout timeline")?,
                )?,
                "health" => print_json(
                    &generate_health_timeline(&db, &program, period, today)
                        .context("failed to generate health timeline")?,
                )?,
                other => anyhow::bail!("Unknown timeline kind: {}. Use 'workouts' or 'health'", other),
            }
        }
        Command::Streak { program, member } => {
            let report =
                member_streak(&db, &program, &member).context("failed to compute streak")?;
            print_json(&report)?;
        }
        Command::Distribution { program } => {
            let distribution = program_weekday_distribution(&db, &program)
                .context("failed to compute weekday distribution")?;
            print_json(&distribution)?;
        }
    }

    Ok(())
}

fn parse_period(raw: &str) -> Result<Period> {
    raw.parse::<Period>()
        .context("Use one of: day, week, month, year, program")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_terminal(report: &DashboardReport) {
    let title = format!("{} - {}", report.program_name, report.window.label);

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    let totals = &report.summary.totals;
    if totals.workouts == 0 {
        println!("  No workouts logged for this period.");
        println!();
    } else {
        println!("SUMMARY");
        println!(
            "   Workouts: {:<12} Minutes: {}",
            totals.workouts, totals.minutes
        );
        println!(
            "   Avg:      {:<12} Active: {} of {}",
            format!("{} min", totals.avg_minutes),
            totals.active_members,
            totals.total_members
        );
        println!("   At risk:  {}", totals.at_risk_members);
        println!();
    }

    if let Some(progress) = &report.summary.progress {
        println!("PROGRAM");
        println!(
            "   Day {} of {} ({}%), {} remaining",
            progress.elapsed_days,
            progress.total_days,
            progress.progress_percent,
            progress.remaining_days
        );
        println!();
    }

    if let Some(trends) = &report.summary.trends {
        println!("TRENDS");
        println!(
            "   Workouts: {:<8} Minutes: {:<8} Active: {}",
            TrendComparison::format_delta(trends.workouts.change_pct),
            TrendComparison::format_delta(trends.minutes.change_pct),
            TrendComparison::format_delta(trends.active_members.change_pct)
        );
        println!(
            "   Avg duration: {}",
            TrendComparison::format_delta(trends.duration.change_pct)
        );
        println!();
    }

    if !report.summary.top_performers.is_empty() {
        println!("TOP PERFORMERS");
        for (i, member) in report.summary.top_performers.iter().enumerate() {
            println!(
                "   {}. {:<16} {:>4} workouts {:>6} min",
                i + 1,
                member.name,
                member.workouts,
                member.minutes
            );
        }
        println!();
    }

    if !report.summary.top_workout_types.is_empty() {
        println!("WORKOUT TYPES");
        for kind in &report.summary.top_workout_types {
            println!("   {:<16} {:>4}", kind.name, kind.workouts);
        }
        println!();
    }

    println!("ACTIVITY");
    let peak = report
        .timeline
        .iter()
        .map(|p| p.workouts)
        .max()
        .unwrap_or(0)
        .max(1);
    for point in &report.timeline {
        let width = (point.workouts * 30 / peak) as usize;
        println!(
            "   {:>5} {:<30} {}",
            point.label,
            "█".repeat(width),
            point.workouts
        );
    }
    println!();
}

fn print_markdown(report: &DashboardReport) {
    println!("# {}: {}", report.program_name, report.window.label);
    println!();
    println!(
        "*{} to {}*",
        report.window.start.format("%Y-%m-%d"),
        report.window.end.format("%Y-%m-%d")
    );
    println!();

    let totals = &report.summary.totals;
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Workouts | {} |", totals.workouts);
    println!("| Minutes | {} |", totals.minutes);
    println!("| Avg Duration | {} min |", totals.avg_minutes);
    println!(
        "| Active Members | {} of {} |",
        totals.active_members, totals.total_members
    );
    println!("| At Risk | {} |", totals.at_risk_members);
    println!();

    if let Some(progress) = &report.summary.progress {
        println!("## Program Progress");
        println!();
        println!(
            "Day {} of {} ({}%), {} days remaining.",
            progress.elapsed_days,
            progress.total_days,
            progress.progress_percent,
            progress.remaining_days
        );
        println!();
    }

    if let Some(trends) = &report.summary.trends {
        println!("## Trends vs Previous Period");
        println!();
        println!("| Metric | Change |");
        println!("|--------|--------|");
        println!(
            "| Workouts | {} |",
            TrendComparison::format_delta(trends.workouts.change_pct)
        );
        println!(
            "| Minutes | {} |",
            TrendComparison::format_delta(trends.minutes.change_pct)
        );
        println!(
            "| Active Members | {} |",
            TrendComparison::format_delta(trends.active_members.change_pct)
        );
        println!(
            "| Avg Duration | {} |",
            TrendComparison::format_delta(trends.duration.change_pct)
        );
        println!();
    }

    if !report.summary.top_performers.is_empty() {
        println!("## Top Performers");
        println!();
        for (i, member) in report.summary.top_performers.iter().enumerate() {
            println!(
                "{}. **{}** - {} workouts, {} min",
                i + 1,
                member.name,
                member.workouts,
                member.minutes
            );
        }
        println!();
    }

    if !report.summary.top_workout_types.is_empty() {
        println!("## Workout Types");
        println!();
        for kind in &report.summary.top_workout_types {
            println!("- **{}**: {}", kind.name, kind.workouts);
        }
        println!();
    }

    println!("## Busiest Days");
    println!();
    println!("| Day | Workouts | Minutes |");
    println!("|-----|----------|---------|");
    for day in &report.weekday_distribution {
        println!("| {} | {} | {} |", day.day, day.workouts, day.minutes);
    }
    println!();

    println!("---");
    println!("*Generated by gymtrack-report*");
}
