use std::fmt::Display;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single unit of work inside a [Log].
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    /// Minutes spent on the task.
    pub time_spent: u32,
    pub completed: bool,
}

/// One user's record of a single day of work.
///
/// Records are treated as values: a review produces a new [Log] which then replaces the stored
/// one by id, see [MemoryStore::replace_log](super::data_source::MemoryStore::replace_log).
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    pub mood: Mood,
    #[serde(default)]
    pub blockers: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default)]
    pub manager_comments: Option<String>,
}

impl Log {
    pub fn review_state(&self) -> ReviewState {
        if self.reviewed {
            ReviewState::Reviewed
        } else {
            ReviewState::Unreviewed
        }
    }

    /// Blockers that contain something other than whitespace.
    pub fn active_blockers(&self) -> Option<&str> {
        self.blockers
            .as_deref()
            .filter(|blockers| !blockers.trim().is_empty())
    }
}

/// Review status of a [Log]. The only transition is `Unreviewed -> Reviewed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Unreviewed,
    Reviewed,
}

impl Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewState::Unreviewed => write!(f, "pending"),
            ReviewState::Reviewed => write!(f, "reviewed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Productive,
    Neutral,
    Frustrated,
    Stressed,
    Inspired,
}

impl Mood {
    /// Lowercase name, the same one used in fixture files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Productive => "productive",
            Mood::Neutral => "neutral",
            Mood::Frustrated => "frustrated",
            Mood::Stressed => "stressed",
            Mood::Inspired => "inspired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Productive => "Productive 😄",
            Mood::Neutral => "Neutral 😐",
            Mood::Frustrated => "Frustrated 😓",
            Mood::Stressed => "Stressed 😰",
            Mood::Inspired => "Inspired 🚀",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Manager,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Developer => write!(f, "developer"),
            Role::Manager => write!(f, "manager"),
        }
    }
}

/// A person reporting to a manager. `manager_id` is a plain reference, not ownership.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub team: Option<String>,
    pub manager_id: String,
}

/// The authenticated actor.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

/// One cell of the productivity heatmap. Derived on every request, never stored.
#[derive(PartialEq, Eq, Debug, Serialize, Clone, Copy)]
pub struct ProductivityPoint {
    pub date: NaiveDate,
    /// 0 to 10.
    pub value: u8,
}
