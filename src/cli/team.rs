use std::fmt::Write;

use ansi_term::Style;
use anyhow::Result;
use clap::Parser;

use crate::{
    auth::require_manager,
    query::{
        member_name, search_team_logs, sort_by_recency, team_logs_for_manager,
        team_members_for_manager, TeamLogFilter,
    },
    review::{review_team_log, team_log_for_review},
    store::{data_source::DataSource, entities::User},
};

use super::{
    output::{log_details, team_log_line},
    AppContext,
};

#[derive(Debug, Parser)]
pub struct TeamCommand {
    #[arg(long, value_enum, default_value_t = TeamLogFilter::All)]
    filter: TeamLogFilter,
    #[arg(
        long,
        short,
        help = "Only show logs mentioning this in the developer's name, tasks, blockers or mood"
    )]
    search: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ReviewCommand {
    log_id: String,
    #[arg(
        long,
        short,
        help = "Feedback for the developer. Without it the log is only displayed"
    )]
    feedback: Option<String>,
}

/// Renders the team view: members first, then the filtered log table.
pub fn render_team_view(
    store: &impl DataSource,
    manager: &User,
    filter: TeamLogFilter,
    search: &str,
) -> String {
    let bold = Style::new().bold();
    let members = team_members_for_manager(store, &manager.id);
    let mut logs = team_logs_for_manager(store, &manager.id)
        .into_iter()
        .filter(|log| filter.matches(log))
        .collect::<Vec<_>>();
    logs = search_team_logs(logs, &members, search);
    sort_by_recency(&mut logs);

    let mut output = String::new();
    let _ = writeln!(output, "{}", bold.paint("Team members"));
    if members.is_empty() {
        let _ = writeln!(output, "  Nobody reports to you yet");
    }
    for member in &members {
        let _ = writeln!(
            output,
            "  {}\t{}\t{}",
            member.name,
            member.email,
            member.team.as_deref().unwrap_or("-")
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", bold.paint("Team logs"));
    if logs.is_empty() {
        let message = if !search.trim().is_empty() {
            format!("No logs match your search \"{}\"", search.trim())
        } else if filter == TeamLogFilter::Unreviewed {
            "All logs have been reviewed!".to_string()
        } else {
            "No logs found".to_string()
        };
        let _ = writeln!(output, "  {message}");
    }
    for log in &logs {
        let _ = writeln!(output, "  {}", team_log_line(log, &members));
    }
    output
}

pub async fn process_team_command(
    context: &AppContext,
    TeamCommand { filter, search }: TeamCommand,
) -> Result<()> {
    let manager = require_manager(context.auth.as_ref(), "view team logs").await?;
    print!(
        "{}",
        render_team_view(
            &context.store,
            &manager,
            filter,
            search.as_deref().unwrap_or_default()
        )
    );
    Ok(())
}

pub async fn process_review_command(
    context: &mut AppContext,
    ReviewCommand { log_id, feedback }: ReviewCommand,
) -> Result<()> {
    let manager = require_manager(context.auth.as_ref(), "review team logs").await?;
    let members = team_members_for_manager(&context.store, &manager.id);

    let log = match feedback {
        Some(feedback) => {
            let log = review_team_log(&mut context.store, &manager, &log_id, &feedback)?;
            println!("Review submitted");
            log
        }
        None => team_log_for_review(&context.store, &manager, &log_id)?,
    };

    print!(
        "{}",
        log_details(&log, Some(member_name(&members, &log.user_id)))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{mock_account, MockAuthenticator},
        error::WorklogError,
        query::find_log,
        store::data_source::MemoryStore,
        utils::{clock::DefaultClock, logging::TEST_LOGGING, time::DateStyle},
    };

    fn manager_context() -> AppContext {
        let mut auth = MockAuthenticator::new();
        auth.expect_current_user()
            .returning(|| Ok(mock_account("manager@example.com")));
        AppContext {
            store: MemoryStore::seeded(),
            auth: Box::new(auth),
            clock: Box::new(DefaultClock),
            date_style: DateStyle::Uk,
        }
    }

    #[test]
    fn team_view_lists_members_and_logs() {
        let store = MemoryStore::seeded();
        let manager = mock_account("manager@example.com").unwrap();
        let rendered = render_team_view(&store, &manager, TeamLogFilter::All, "");
        for name in ["John Developer", "Alice Engineer", "Bob Coder"] {
            assert!(rendered.contains(name));
        }
        assert!(rendered.contains("log-1"));
        assert!(rendered.contains("log-2"));
        assert!(rendered.contains("log-3"));
    }

    #[test]
    fn team_view_explains_empty_results() {
        let store = MemoryStore::seeded();
        let manager = mock_account("manager@example.com").unwrap();
        let rendered = render_team_view(&store, &manager, TeamLogFilter::All, "kubernetes");
        assert!(rendered.contains("No logs match your search \"kubernetes\""));

        let mut reviewed_store = MemoryStore::seeded();
        for id in ["log-1", "log-3"] {
            review_team_log(&mut reviewed_store, &manager, id, "Thanks").unwrap();
        }
        let rendered = render_team_view(&reviewed_store, &manager, TeamLogFilter::Unreviewed, "");
        assert!(rendered.contains("All logs have been reviewed!"));
    }

    #[tokio::test]
    async fn review_command_updates_store() -> Result<()> {
        *TEST_LOGGING;
        let mut context = manager_context();
        process_review_command(
            &mut context,
            ReviewCommand {
                log_id: "log-3".into(),
                feedback: Some("Let's sync with the API team".into()),
            },
        )
        .await?;

        let log = find_log(&context.store, "log-3").unwrap();
        assert!(log.reviewed);
        assert_eq!(
            log.manager_comments.as_deref(),
            Some("Let's sync with the API team")
        );
        Ok(())
    }

    #[tokio::test]
    async fn viewing_without_feedback_changes_nothing() -> Result<()> {
        let mut context = manager_context();
        process_review_command(
            &mut context,
            ReviewCommand {
                log_id: "log-1".into(),
                feedback: None,
            },
        )
        .await?;
        assert!(!find_log(&context.store, "log-1").unwrap().reviewed);
        Ok(())
    }

    #[tokio::test]
    async fn developers_are_turned_away() {
        let mut auth = MockAuthenticator::new();
        auth.expect_current_user()
            .returning(|| Ok(mock_account("developer@example.com")));
        let context = AppContext {
            store: MemoryStore::seeded(),
            auth: Box::new(auth),
            clock: Box::new(DefaultClock),
            date_style: DateStyle::Uk,
        };
        let result = process_team_command(
            &context,
            TeamCommand {
                filter: TeamLogFilter::All,
                search: None,
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err().downcast_ref::<WorklogError>(),
            Some(WorklogError::Unauthorized { .. })
        ));
    }
}
