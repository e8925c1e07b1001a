//! Recoverable conditions surfaced to the user. None of them are fatal to the process.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorklogError {
    #[error("Log {0} could not be found")]
    LogNotFound(String),

    #[error("You don't have permission to {action}")]
    Unauthorized { action: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("You must be logged in to {action}")]
    NotLoggedIn { action: String },

    #[error("{0}")]
    Validation(String),

    #[error("A log for {date} already exists ({existing})")]
    DuplicateDay { date: NaiveDate, existing: String },
}

impl WorklogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    pub fn not_logged_in(action: impl Into<String>) -> Self {
        Self::NotLoggedIn {
            action: action.into(),
        }
    }
}
