//! Turning a submitted "today's work" form into a stored [Log].

use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    error::WorklogError,
    store::{
        data_source::DataSource,
        entities::{Log, Mood, Task, User},
    },
};

const MIN_DESCRIPTION_LEN: usize = 2;
const MIN_TIME_SPENT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub description: String,
    pub time_spent: u32,
    pub completed: bool,
}

/// Parses `description:minutes` with an optional `:done` suffix, for example
/// `"Fixed navigation bug:45:done"`. Descriptions may contain colons themselves.
impl FromStr for TaskDraft {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, completed) = match s.rsplit_once(':') {
            Some((rest, flag)) if flag.trim().eq_ignore_ascii_case("done") => (rest, true),
            _ => (s, false),
        };
        let (description, minutes) = rest
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("Expected <description>:<minutes>[:done], got {s}"))?;
        let time_spent = minutes
            .trim()
            .parse::<u32>()
            .map_err(|e| anyhow!("Can't parse {minutes} into minutes: {e}"))?;
        Ok(TaskDraft {
            description: description.trim().to_string(),
            time_spent,
            completed,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LogDraft {
    pub date: NaiveDate,
    pub tasks: Vec<TaskDraft>,
    pub mood: Mood,
    pub blockers: Option<String>,
}

impl LogDraft {
    fn validate(&self) -> Result<(), WorklogError> {
        if self.tasks.is_empty() {
            return Err(WorklogError::validation("At least one task is required"));
        }
        for task in &self.tasks {
            if task.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
                return Err(WorklogError::validation("Description is required"));
            }
            if task.time_spent < MIN_TIME_SPENT {
                return Err(WorklogError::validation(
                    "Time spent must be at least 1 minute",
                ));
            }
        }
        Ok(())
    }

    /// Validates the draft and builds the log `author` would own. Nothing is stored, the caller
    /// inserts the result.
    pub fn into_log(self, store: &impl DataSource, author: &User) -> Result<Log, WorklogError> {
        self.validate()?;

        if let Some(existing) = store
            .list_logs()
            .iter()
            .find(|log| log.user_id == author.id && log.date == self.date)
        {
            return Err(WorklogError::DuplicateDay {
                date: self.date,
                existing: existing.id.clone(),
            });
        }

        let mut next_task = next_suffix(
            store
                .list_logs()
                .iter()
                .flat_map(|log| log.tasks.iter().map(|task| task.id.as_str())),
            "task-",
        );
        let tasks = self
            .tasks
            .into_iter()
            .map(|draft| {
                let task = Task {
                    id: format!("task-{next_task}"),
                    description: draft.description.trim().to_string(),
                    time_spent: draft.time_spent,
                    completed: draft.completed,
                };
                next_task += 1;
                task
            })
            .collect();

        let id = format!(
            "log-{}",
            next_suffix(store.list_logs().iter().map(|log| log.id.as_str()), "log-")
        );
        debug!("Created draft {id} for {}", author.id);

        Ok(Log {
            id,
            user_id: author.id.clone(),
            date: self.date,
            tasks,
            mood: self.mood,
            blockers: self
                .blockers
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            reviewed: false,
            manager_comments: None,
        })
    }
}

/// One past the highest numeric suffix among ids starting with `prefix`.
fn next_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        data_source::MemoryStore,
        entities::{ReviewState, Role},
    };

    fn author() -> User {
        User {
            id: "dev-123".into(),
            name: "John Developer".into(),
            email: "developer@example.com".into(),
            role: Role::Developer,
            team: Some("frontend".into()),
        }
    }

    fn draft(date: NaiveDate, tasks: Vec<TaskDraft>) -> LogDraft {
        LogDraft {
            date,
            tasks,
            mood: Mood::Inspired,
            blockers: Some("   ".into()),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn parses_task_arguments() {
        assert_eq!(
            "Fixed navigation bug:45:done".parse::<TaskDraft>().unwrap(),
            TaskDraft {
                description: "Fixed navigation bug".into(),
                time_spent: 45,
                completed: true,
            }
        );
        assert_eq!(
            "Review: PR #12:30".parse::<TaskDraft>().unwrap(),
            TaskDraft {
                description: "Review: PR #12".into(),
                time_spent: 30,
                completed: false,
            }
        );
        assert!("No minutes here".parse::<TaskDraft>().is_err());
        assert!("Broken:soon".parse::<TaskDraft>().is_err());
    }

    #[test]
    fn new_log_starts_unreviewed_with_fresh_ids() -> Result<(), WorklogError> {
        let store = MemoryStore::seeded();
        let log = draft(
            day(20),
            vec![
                "Wrote tests:60:done".parse().unwrap(),
                "Refactor store:30".parse().unwrap(),
            ],
        )
        .into_log(&store, &author())?;

        assert_eq!(log.id, "log-4");
        assert_eq!(log.tasks[0].id, "task-9");
        assert_eq!(log.tasks[1].id, "task-10");
        assert_eq!(log.user_id, "dev-123");
        assert_eq!(log.review_state(), ReviewState::Unreviewed);
        assert_eq!(log.blockers, None);
        assert_eq!(log.manager_comments, None);
        Ok(())
    }

    #[test]
    fn second_log_for_same_day_is_rejected() {
        let store = MemoryStore::seeded();
        let result = draft(day(19), vec!["More work:30".parse().unwrap()]).into_log(&store, &author());
        assert_eq!(
            result,
            Err(WorklogError::DuplicateDay {
                date: day(19),
                existing: "log-1".into(),
            })
        );
    }

    #[test]
    fn validation_errors() {
        let store = MemoryStore::seeded();
        let invalid = |tasks: Vec<TaskDraft>| draft(day(25), tasks).into_log(&store, &author());

        assert_eq!(
            invalid(vec![]),
            Err(WorklogError::validation("At least one task is required"))
        );
        assert_eq!(
            invalid(vec!["x:30".parse().unwrap()]),
            Err(WorklogError::validation("Description is required"))
        );
        assert_eq!(
            invalid(vec!["Standup:0".parse().unwrap()]),
            Err(WorklogError::validation("Time spent must be at least 1 minute"))
        );
    }

    #[test]
    fn huge_task_minutes_are_accepted_and_summed() -> Result<(), WorklogError> {
        let store = MemoryStore::seeded();
        let log = draft(
            day(21),
            vec![
                "Big task:4294967295".parse().unwrap(),
                "Other:1".parse().unwrap(),
            ],
        )
        .into_log(&store, &author())?;
        assert_eq!(crate::aggregation::time_spent(&log), 4_294_967_296);
        Ok(())
    }

    #[test]
    fn ids_start_at_one_on_empty_store() -> Result<(), WorklogError> {
        let store = MemoryStore::default();
        let log = draft(day(1), vec!["Setup:15".parse().unwrap()]).into_log(&store, &author())?;
        assert_eq!(log.id, "log-1");
        assert_eq!(log.tasks[0].id, "task-1");
        Ok(())
    }
}
