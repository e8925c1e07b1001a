use std::fmt::Write;

use ansi_term::Style;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;

use crate::{
    aggregation::{
        completion_stats, format_duration, latest_log,
        productivity::{productivity_series, DEFAULT_WINDOW_DAYS},
        time_spent,
    },
    auth::require_user,
    query::{
        logs_for_user, sort_by_recency, team_logs_for_manager, team_members_for_manager,
        TeamLogFilter,
    },
    store::{
        data_source::DataSource,
        entities::{Log, User},
    },
    utils::time::parse_day,
};

use super::{
    output::{
        heatmap::{render_heatmap, HEATMAP_DAYS},
        log_line, short_date, team_log_line,
    },
    AppContext,
};

const RECENT_LOGS: usize = 3;

#[derive(Debug, Parser)]
pub struct DashboardCommand {
    #[arg(
        long,
        help = "Pretend today is another day. Examples are \"yesterday\", \"15/03/2025\", \"2025-03-15\""
    )]
    today: Option<String>,
    #[arg(long, help = "List every team log instead of only those awaiting review. Managers only")]
    all_team: bool,
}

fn write_latest_log(output: &mut String, latest: Option<&Log>) {
    let bold = Style::new().bold();
    let Some(log) = latest else {
        let _ = writeln!(output, "{}", bold.paint("Latest log"));
        let _ = writeln!(output, "  Tasks  0/0  No tasks logged today");
        let _ = writeln!(output, "  Time   0m   No time tracked today");
        let _ = writeln!(output, "  Mood   Not logged");
        return;
    };

    let stats = completion_stats(log);
    let minutes = time_spent(log);
    let _ = writeln!(
        output,
        "{}",
        bold.paint(format!("Latest log, {}", short_date(log.date)))
    );
    let _ = writeln!(
        output,
        "  Tasks  {}/{} ({})  {}",
        stats.completed,
        stats.total,
        stats.rate,
        if stats.total == 0 {
            "No tasks logged today".to_string()
        } else {
            format!("{} of {} tasks completed", stats.completed, stats.total)
        }
    );
    let _ = writeln!(
        output,
        "  Time   {}  {}",
        format_duration(minutes),
        if minutes == 0 {
            "No time tracked today".to_string()
        } else {
            format!("Across {} different tasks", stats.total)
        }
    );
    let blockers = log
        .active_blockers()
        .map_or_else(|| "No blockers reported".to_string(), |b| format!("Blocker: {b}"));
    let _ = writeln!(output, "  Mood   {}  {blockers}", log.mood.label());
}

fn write_team_activity(
    output: &mut String,
    store: &impl DataSource,
    manager: &User,
    team_filter: TeamLogFilter,
) {
    let mut team_logs = team_logs_for_manager(store, &manager.id);
    if team_logs.is_empty() {
        return;
    }
    sort_by_recency(&mut team_logs);
    let members = team_members_for_manager(store, &manager.id);
    let pending = team_logs
        .iter()
        .filter(|log| TeamLogFilter::Unreviewed.matches(log))
        .count();

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", Style::new().bold().paint("Team activity"));
    let _ = writeln!(
        output,
        "  {} logs, {pending} awaiting review",
        team_logs.len()
    );
    let shown = team_logs
        .iter()
        .filter(|log| team_filter.matches(log))
        .collect::<Vec<_>>();
    if shown.is_empty() {
        let _ = writeln!(output, "  All logs have been reviewed!");
    }
    for log in shown {
        let _ = writeln!(output, "  {}", team_log_line(log, &members));
    }
}

/// Renders the dashboard of `user` as of `today`. Managers also get the team logs matching
/// `team_filter`.
pub fn render_dashboard(
    store: &impl DataSource,
    user: &User,
    today: NaiveDate,
    team_filter: TeamLogFilter,
) -> String {
    let bold = Style::new().bold();
    let mut logs = logs_for_user(store, &user.id);
    sort_by_recency(&mut logs);

    let mut output = String::new();
    let _ = writeln!(output, "Welcome back, {}", user.name);
    let _ = writeln!(output);
    write_latest_log(&mut output, latest_log(&logs));

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{}",
        bold.paint(format!("Productivity, past {HEATMAP_DAYS} days"))
    );
    let series = productivity_series(store, &user.id, today, DEFAULT_WINDOW_DAYS);
    let _ = write!(output, "{}", render_heatmap(&series));

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", bold.paint("Recent activity"));
    if logs.is_empty() {
        let _ = writeln!(output, "  Nothing logged yet");
    }
    for log in logs.iter().take(RECENT_LOGS) {
        let _ = writeln!(output, "  {}", log_line(log));
    }

    if user.is_manager() {
        write_team_activity(&mut output, store, user, team_filter);
    }
    output
}

pub async fn process_dashboard_command(
    context: &AppContext,
    DashboardCommand { today, all_team }: DashboardCommand,
) -> Result<()> {
    let user = require_user(context.auth.as_ref(), "view the dashboard").await?;
    let today = match today {
        Some(today) => parse_day(&today, context.clock.time(), context.date_style)?,
        None => context.clock.today(),
    };
    let team_filter = if all_team {
        TeamLogFilter::All
    } else {
        TeamLogFilter::Unreviewed
    };
    print!(
        "{}",
        render_dashboard(&context.store, &user, today, team_filter)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::mock_account, review::review_team_log, store::data_source::MemoryStore};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn developer_dashboard_uses_latest_log() {
        let store = MemoryStore::seeded();
        let user = mock_account("developer@example.com").unwrap();
        let rendered = render_dashboard(&store, &user, day(20), TeamLogFilter::Unreviewed);

        assert!(rendered.contains("Welcome back, John Developer"));
        assert!(rendered.contains("Sat, Apr 19"));
        assert!(rendered.contains("2 of 3 tasks completed"));
        assert!(rendered.contains("4h 15m"));
        assert!(rendered.contains("Blocker: Need design assets for profile page"));
        assert!(!rendered.contains("awaiting review"));
    }

    #[test]
    fn manager_dashboard_lists_unreviewed_team_logs() {
        let store = MemoryStore::seeded();
        let user = mock_account("manager@example.com").unwrap();
        let rendered = render_dashboard(&store, &user, day(20), TeamLogFilter::Unreviewed);

        assert!(rendered.contains("No tasks logged today"));
        assert!(rendered.contains("Nothing logged yet"));
        assert!(rendered.contains("3 logs, 2 awaiting review"));
        assert!(rendered.contains("log-1\tJohn Developer"));
        assert!(rendered.contains("log-3\tAlice Engineer"));
        assert!(!rendered.contains("log-2"));
        assert!(!rendered.contains("All logs have been reviewed!"));

        let all = render_dashboard(&store, &user, day(20), TeamLogFilter::All);
        assert!(all.contains("log-2\tJohn Developer"));
    }

    #[test]
    fn manager_dashboard_when_everything_is_reviewed() -> Result<()> {
        let mut store = MemoryStore::seeded();
        let user = mock_account("manager@example.com").unwrap();
        for id in ["log-1", "log-3"] {
            review_team_log(&mut store, &user, id, "Looks good")?;
        }
        let rendered = render_dashboard(&store, &user, day(20), TeamLogFilter::Unreviewed);

        assert!(rendered.contains("3 logs, 0 awaiting review"));
        assert!(rendered.contains("All logs have been reviewed!"));
        Ok(())
    }

    #[test]
    fn manager_without_team_has_no_team_section() {
        let store = MemoryStore::seeded();
        let mut user = mock_account("manager@example.com").unwrap();
        user.id = "mgr-999".into();
        let rendered = render_dashboard(&store, &user, day(20), TeamLogFilter::Unreviewed);
        assert!(!rendered.contains("Team activity"));
    }
}
