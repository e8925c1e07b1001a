//! Manager feedback on team logs.
//!
//! Reviewing is a one way `Unreviewed -> Reviewed` transition. A reviewed log can receive new
//! feedback, which replaces the old comments, but it never goes back to unreviewed.

use tracing::info;

use crate::{
    error::WorklogError,
    query::{find_log, team_members_for_manager},
    store::{
        data_source::{DataSource, MemoryStore},
        entities::{Log, User},
    },
};

/// Looks up a log the manager is allowed to see. Logs of people outside their team are
/// reported as missing.
pub fn team_log_for_review(
    store: &impl DataSource,
    manager: &User,
    log_id: &str,
) -> Result<Log, WorklogError> {
    if !manager.is_manager() {
        return Err(WorklogError::unauthorized("view team logs"));
    }
    let log = find_log(store, log_id).ok_or_else(|| WorklogError::LogNotFound(log_id.into()))?;
    let in_team = team_members_for_manager(store, &manager.id)
        .iter()
        .any(|member| member.id == log.user_id);
    if !in_team {
        return Err(WorklogError::LogNotFound(log_id.into()));
    }
    Ok(log)
}

/// Produces the reviewed version of `log`. The input is left untouched.
pub fn submit_review(log: &Log, reviewer: &User, feedback: &str) -> Result<Log, WorklogError> {
    if !reviewer.is_manager() {
        return Err(WorklogError::unauthorized("review logs"));
    }
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(WorklogError::validation("Feedback is required"));
    }

    info!("{} reviewed {}", reviewer.id, log.id);
    Ok(Log {
        reviewed: true,
        manager_comments: Some(feedback.to_string()),
        ..log.clone()
    })
}

/// Reviews a team log and stores the result, returning the stored record.
pub fn review_team_log(
    store: &mut MemoryStore,
    manager: &User,
    log_id: &str,
    feedback: &str,
) -> Result<Log, WorklogError> {
    let log = team_log_for_review(&*store, manager, log_id)?;
    let reviewed = submit_review(&log, manager, feedback)?;
    store.replace_log(reviewed.clone())?;
    Ok(reviewed)
}
