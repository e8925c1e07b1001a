pub mod heatmap;

use std::fmt::Write;

use ansi_term::{Colour, Style};
use chrono::NaiveDate;

use crate::{
    aggregation::{completion_stats, format_duration, time_spent},
    query::member_name,
    store::entities::{Log, ReviewState, TeamMember},
    utils::time::iso_date,
};

/// Short human date, "Sat, Apr 19".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn review_badge(log: &Log) -> String {
    let state = log.review_state();
    let colour = match state {
        ReviewState::Reviewed => Colour::Green,
        ReviewState::Unreviewed => Colour::Yellow,
    };
    colour.paint(state.to_string()).to_string()
}

/// One line summary used by the log list and the dashboard.
pub fn log_line(log: &Log) -> String {
    let stats = completion_stats(log);
    format!(
        "{}\t{}\t{}/{} tasks\t{} tracked\t{}\t{}",
        log.id,
        short_date(log.date),
        stats.completed,
        stats.total,
        format_duration(time_spent(log)),
        log.mood,
        review_badge(log),
    )
}

/// Row of the team table. Blockers are flagged but not printed in full.
pub fn team_log_line(log: &Log, members: &[TeamMember]) -> String {
    let stats = completion_stats(log);
    let blockers = if log.active_blockers().is_some() {
        Colour::Red.paint("blocked").to_string()
    } else {
        "-".to_string()
    };
    format!(
        "{}\t{}\t{}\t{}/{} ({})\t{}\t{}\t{}",
        log.id,
        member_name(members, &log.user_id),
        iso_date(log.date),
        stats.completed,
        stats.total,
        format_duration(time_spent(log)),
        log.mood,
        blockers,
        review_badge(log),
    )
}

/// Full view of a single log with its tasks, blockers and feedback.
pub fn log_details(log: &Log, owner: Option<&str>) -> String {
    let stats = completion_stats(log);
    let mut output = String::new();
    let bold = Style::new().bold();

    let _ = writeln!(output, "{}", bold.paint(format!("Work log {}", log.id)));
    if let Some(owner) = owner {
        let _ = writeln!(output, "Developer:  {owner}");
    }
    let _ = writeln!(output, "Date:       {} ({})", short_date(log.date), iso_date(log.date));
    let _ = writeln!(
        output,
        "Completion: {}/{} tasks ({})",
        stats.completed, stats.total, stats.rate
    );
    let _ = writeln!(
        output,
        "Time:       {}",
        format_duration(time_spent(log))
    );
    let _ = writeln!(output, "Mood:       {}", log.mood.label());
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", bold.paint("Tasks"));
    for task in &log.tasks {
        let mark = if task.completed {
            Colour::Green.paint("[x]")
        } else {
            Colour::White.dimmed().paint("[ ]")
        };
        let _ = writeln!(
            output,
            "  {mark} {} ({})",
            task.description,
            format_duration(task.time_spent.into())
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", bold.paint("Blockers"));
    match log.active_blockers() {
        Some(blockers) => {
            let _ = writeln!(output, "  {}", Colour::Red.paint(blockers));
        }
        None => {
            let _ = writeln!(output, "  No blockers reported");
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", bold.paint("Manager feedback"));
    match (&log.manager_comments, log.reviewed) {
        (Some(comments), true) => {
            let _ = writeln!(output, "  {comments}");
        }
        _ => {
            let _ = writeln!(output, "  Awaiting review");
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{query::find_log, store::data_source::MemoryStore};

    #[test]
    fn short_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 19).unwrap();
        assert_eq!(short_date(date), "Sat, Apr 19");
    }

    #[test]
    fn details_show_feedback_only_once_reviewed() {
        let store = MemoryStore::seeded();
        let pending = log_details(&find_log(&store, "log-1").unwrap(), Some("John Developer"));
        assert!(pending.contains("Awaiting review"));
        assert!(pending.contains("2/3 tasks (67%)"));
        assert!(pending.contains("Need design assets for profile page"));
        assert!(pending.contains("Developer:  John Developer"));

        let reviewed = log_details(&find_log(&store, "log-2").unwrap(), None);
        assert!(reviewed.contains("Good work on the documentation"));
        assert!(reviewed.contains("No blockers reported"));
        assert!(reviewed.contains("3h 45m"));
    }

    #[test]
    fn team_lines_use_member_names() {
        let store = MemoryStore::seeded();
        let log = find_log(&store, "log-3").unwrap();
        let members = crate::query::team_members_for_manager(&store, "mgr-456");
        let line = team_log_line(&log, &members);
        assert!(line.contains("Alice Engineer"));
        assert!(line.contains("1/2 (5h)"));
        assert!(line.contains("2025-04-19"));
    }

    #[test]
    fn badges_follow_review_state() {
        let store = MemoryStore::seeded();
        assert!(review_badge(&find_log(&store, "log-1").unwrap()).contains("pending"));
        assert!(review_badge(&find_log(&store, "log-2").unwrap()).contains("reviewed"));
    }
}
