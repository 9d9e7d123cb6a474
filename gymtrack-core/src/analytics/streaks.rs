//! Consecutive-day streaks for a single member.

use chrono::NaiveDate;
use serde::Serialize;

/// Day thresholds a streak can reach, ascending.
pub const MILESTONE_DAYS: [i64; 6] = [3, 7, 14, 30, 60, 90];

/// Current and longest streak, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    /// Run ending at the latest logged date
    pub current: i64,
    pub longest: i64,
}

/// One milestone and whether the member reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub days: i64,
    pub achieved: bool,
}

/// Compute streaks from the days a member logged activity.
///
/// Duplicates and ordering do not matter. The current streak counts back
/// from the most recent logged date, not from today, so an inactive member
/// keeps their last run.
pub fn compute_streak<I>(dates: I) -> Streak
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut days: Vec<NaiveDate> = dates.into_iter().collect();
    days.sort_unstable();
    days.dedup();

    if days.is_empty() {
        return Streak::default();
    }

    let mut longest = 1i64;
    let mut run = 1i64;
    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    let mut current = 1i64;
    for pair in days.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
        } else {
            break;
        }
    }

    Streak { current, longest }
}

/// The milestone table for a streak.
pub fn milestones(streak: &Streak) -> Vec<Milestone> {
    MILESTONE_DAYS
        .iter()
        .map(|&days| Milestone {
            days,
            achieved: streak.longest >= days || streak.current >= days,
        })
        .collect()
}
