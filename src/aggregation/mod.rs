pub mod productivity;

use crate::{
    store::entities::Log,
    utils::percentage::Percentage,
};

/// Task completion of a single log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: u32,
    pub total: u32,
    /// Completed share of all tasks, 0% for a log without tasks.
    pub rate: Percentage,
}

pub fn completion_stats(log: &Log) -> CompletionStats {
    let total = log.tasks.len() as u32;
    let completed = log.tasks.iter().filter(|task| task.completed).count() as u32;
    CompletionStats {
        completed,
        total,
        rate: Percentage::of(completed, total),
    }
}

/// Total minutes tracked across all tasks of the log.
/// Summed in `u64`, task minutes are uncapped.
pub fn time_spent(log: &Log) -> u64 {
    log.tasks.iter().map(|task| u64::from(task.time_spent)).sum()
}

/// Formats minutes the way they are shown next to logs: "45m", "2h", "1h 30m".
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, mins) => format!("{mins}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, mins) => format!("{hours}h {mins}m"),
    }
}

/// The log with the latest date, the first one stored wins ties.
pub fn latest_log(logs: &[Log]) -> Option<&Log> {
    logs.iter()
        .reduce(|latest, log| if log.date > latest.date { log } else { latest })
}
