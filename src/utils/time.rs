use std::fmt::Display;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_english::parse_date_string;
use clap::ValueEnum;

/// This is the standard way of converting a date to a string in worklog.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns `count` consecutive days ending at `today`, most recent first.
pub fn days_back(today: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    (0..count as i64).map(move |offset| today - Duration::days(offset))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Parses user input like "yesterday", "2025-04-19" or "15/03/2025" into a calendar day.
pub fn parse_day(input: &str, now: DateTime<Utc>, style: DateStyle) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(input, now, style.into())
        .map(|v| v.date_naive())
        .map_err(|e| anyhow!("Failed to parse date {input}: {e}"))
}
