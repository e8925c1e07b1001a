//! Daily work logs for developers and the managers reviewing them.
//! Developers record tasks, time spent and mood for each day, managers go through their team's
//! logs and leave feedback. Everything runs from an in-memory data set that is rebuilt on every
//! start.
//!

pub mod aggregation;
pub mod auth;
pub mod cli;
pub mod draft;
pub mod error;
pub mod query;
pub mod review;
pub mod store;
pub mod utils;
