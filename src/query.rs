//! Read-only views over a [DataSource]: which logs and members a given actor gets to see.
//!
//! Every function here is total. Unknown ids produce empty results instead of errors, and
//! results keep storage order unless [sort_by_recency] is applied explicitly.

use std::collections::HashSet;

use clap::ValueEnum;
use tracing::trace;

use crate::store::{
    data_source::DataSource,
    entities::{Log, TeamMember},
};

pub fn logs_for_user(store: &impl DataSource, user_id: &str) -> Vec<Log> {
    store
        .list_logs()
        .iter()
        .filter(|log| log.user_id == user_id)
        .cloned()
        .collect()
}

pub fn team_members_for_manager(store: &impl DataSource, manager_id: &str) -> Vec<TeamMember> {
    store
        .list_team_members()
        .iter()
        .filter(|member| member.manager_id == manager_id)
        .cloned()
        .collect()
}

/// Logs of every direct report of `manager_id`.
pub fn team_logs_for_manager(store: &impl DataSource, manager_id: &str) -> Vec<Log> {
    let members = team_members_for_manager(store, manager_id);
    let member_ids = members
        .iter()
        .map(|member| member.id.as_str())
        .collect::<HashSet<_>>();
    trace!("Collecting logs of {} members of {manager_id}", member_ids.len());

    store
        .list_logs()
        .iter()
        .filter(|log| member_ids.contains(log.user_id.as_str()))
        .cloned()
        .collect()
}

pub fn find_log(store: &impl DataSource, log_id: &str) -> Option<Log> {
    store.list_logs().iter().find(|log| log.id == log_id).cloned()
}

/// Orders logs from the most recent date to the oldest. Logs sharing a date keep their
/// relative order.
pub fn sort_by_recency(logs: &mut [Log]) {
    logs.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Name of the member owning `user_id`, "Unknown" if they aren't part of `members`.
pub fn member_name<'a>(members: &'a [TeamMember], user_id: &str) -> &'a str {
    members
        .iter()
        .find(|member| member.id == user_id)
        .map_or("Unknown", |member| member.name.as_str())
}

/// Filters of the personal log list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFilter {
    #[default]
    All,
    WithBlockers,
    /// Logs where every task is done. Logs without tasks never match.
    Completed,
    Reviewed,
}

impl LogFilter {
    pub fn matches(&self, log: &Log) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::WithBlockers => log.active_blockers().is_some(),
            LogFilter::Completed => {
                !log.tasks.is_empty() && log.tasks.iter().all(|task| task.completed)
            }
            LogFilter::Reviewed => log.reviewed,
        }
    }

    pub fn apply(&self, logs: Vec<Log>) -> Vec<Log> {
        logs.into_iter().filter(|log| self.matches(log)).collect()
    }
}

/// Filters of the manager's team view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TeamLogFilter {
    #[default]
    All,
    Unreviewed,
    WithBlockers,
}

impl TeamLogFilter {
    pub fn matches(&self, log: &Log) -> bool {
        match self {
            TeamLogFilter::All => true,
            TeamLogFilter::Unreviewed => !log.reviewed,
            TeamLogFilter::WithBlockers => log.active_blockers().is_some(),
        }
    }
}

/// Case insensitive search over team logs. A log matches when the query is found in the owner's
/// name, a task description, the blockers or the mood. A blank query matches everything, any
/// other query is matched as typed, surrounding whitespace included.
pub fn search_team_logs(logs: Vec<Log>, members: &[TeamMember], query: &str) -> Vec<Log> {
    if query.trim().is_empty() {
        return logs;
    }
    let query = query.to_lowercase();

    logs.into_iter()
        .filter(|log| {
            let name_match = member_name(members, &log.user_id)
                .to_lowercase()
                .contains(&query);
            let task_match = log
                .tasks
                .iter()
                .any(|task| task.description.to_lowercase().contains(&query));
            let blockers_match = log
                .blockers
                .as_deref()
                .is_some_and(|blockers| blockers.to_lowercase().contains(&query));
            name_match || task_match || blockers_match || log.mood.as_str().contains(&query)
        })
        .collect()
}
