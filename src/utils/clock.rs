use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Represents an entity responsible for providing dates across application. This allows the
/// productivity series to be tested against a fixed "today".
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    /// Calendar date used for daily records. Days are UTC days.
    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to the start of a specific day.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}
