use std::fmt::Write;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use crate::{
    auth::require_user,
    draft::{LogDraft, TaskDraft},
    error::WorklogError,
    query::{find_log, logs_for_user, sort_by_recency, LogFilter},
    store::entities::{Log, Mood},
    utils::time::parse_day,
};

use super::{
    output::{log_details, log_line},
    AppContext,
};

#[derive(Debug, Parser)]
pub struct LogsCommand {
    #[arg(long, value_enum, default_value_t = LogFilter::All)]
    filter: LogFilter,
}

#[derive(Debug, Parser)]
pub struct NewCommand {
    #[arg(
        long = "task",
        short,
        required = true,
        help = "Task as <description>:<minutes>[:done], for example \"Fixed navigation bug:45:done\". Repeat for more tasks"
    )]
    tasks: Vec<TaskDraft>,
    #[arg(long, value_enum)]
    mood: Mood,
    #[arg(long)]
    blockers: Option<String>,
    #[arg(
        long,
        help = "Day the log is for. Examples are \"yesterday\", \"15/03/2025\", \"2025-03-15\". Defaults to today"
    )]
    date: Option<String>,
}

pub fn render_log_list(logs: &[Log], filter: LogFilter) -> String {
    let mut output = String::new();
    if logs.is_empty() {
        let _ = match filter {
            LogFilter::All => writeln!(
                output,
                "You haven't created any logs yet. Start with `worklog new`."
            ),
            filter => writeln!(
                output,
                "No logs matching the \"{}\" filter. Try a different filter.",
                filter
                    .to_possible_value()
                    .map(|v| v.get_name().to_string())
                    .unwrap_or_default()
            ),
        };
        return output;
    }
    for log in logs {
        let _ = writeln!(output, "{}", log_line(log));
    }
    output
}

pub async fn process_logs_command(
    context: &AppContext,
    LogsCommand { filter }: LogsCommand,
) -> Result<()> {
    let user = require_user(context.auth.as_ref(), "view your logs").await?;
    let mut logs = filter.apply(logs_for_user(&context.store, &user.id));
    sort_by_recency(&mut logs);
    print!("{}", render_log_list(&logs, filter));
    Ok(())
}

/// Developers can only open their own logs. Anything else reads as missing.
pub fn own_log(context: &AppContext, user_id: &str, log_id: &str) -> Result<Log, WorklogError> {
    find_log(&context.store, log_id)
        .filter(|log| log.user_id == user_id)
        .ok_or_else(|| WorklogError::LogNotFound(log_id.into()))
}

pub async fn process_show_command(context: &AppContext, log_id: &str) -> Result<()> {
    let user = require_user(context.auth.as_ref(), "view logs").await?;
    let log = own_log(context, &user.id, log_id)?;
    print!("{}", log_details(&log, None));
    Ok(())
}

pub async fn process_new_command(
    context: &mut AppContext,
    NewCommand {
        tasks,
        mood,
        blockers,
        date,
    }: NewCommand,
) -> Result<()> {
    let user = require_user(context.auth.as_ref(), "create a log").await?;
    let date = match date {
        Some(date) => parse_day(&date, context.clock.time(), context.date_style)?,
        None => context.clock.today(),
    };

    let log = LogDraft {
        date,
        tasks,
        mood,
        blockers,
    }
    .into_log(&context.store, &user)?;
    context.store.insert_log(log.clone());
    info!("Created log {} for {}", log.id, user.id);

    println!("Log created! It lasts until this process exits, use --data to start from your own data set.");
    print!("{}", log_details(&log, None));
    Ok(())
}
