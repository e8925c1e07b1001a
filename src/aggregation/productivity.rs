use chrono::NaiveDate;
use tracing::instrument;

use crate::{
    query::logs_for_user,
    store::{data_source::DataSource, entities::ProductivityPoint},
    utils::{percentage::rounded_ratio, time::days_back},
};

use super::completion_stats;

pub const DEFAULT_WINDOW_DAYS: usize = 30;

/// Builds one [ProductivityPoint] per day for the `window_days` days ending at `today`, most
/// recent first. Days without a log, or with a log without tasks, score 0. Otherwise the score
/// is the share of completed tasks scaled to 0..=10.
///
/// The series is recomputed from the store on every call.
#[instrument(skip(store))]
pub fn productivity_series(
    store: &impl DataSource,
    user_id: &str,
    today: NaiveDate,
    window_days: usize,
) -> Vec<ProductivityPoint> {
    let user_logs = logs_for_user(store, user_id);

    days_back(today, window_days)
        .map(|date| {
            let value = user_logs
                .iter()
                .find(|log| log.date == date)
                .map_or(0, |log| {
                    let stats = completion_stats(log);
                    rounded_ratio(stats.completed, stats.total, 10)
                });
            ProductivityPoint {
                date,
                value: value as u8,
            }
        })
        .collect()
}

/// Opacity of a heatmap cell, between 0 and 1.
pub fn heatmap_intensity(point: &ProductivityPoint) -> f64 {
    point.value as f64 / 10.
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{
        store::data_source::MemoryStore,
        utils::clock::{Clock, MockClock},
    };

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    #[test]
    fn series_has_fixed_length_without_gaps() {
        let store = MemoryStore::seeded();
        let today = day(2025, 4, 20);
        for user in ["dev-123", "dev-789", "nobody"] {
            let series = productivity_series(&store, user, today, DEFAULT_WINDOW_DAYS);
            assert_eq!(series.len(), 30);
            assert_eq!(series[0].date, today);
            for pair in series.windows(2) {
                assert_eq!(pair[0].date - pair[1].date, Duration::days(1));
            }
        }
    }

    #[test]
    fn series_scores_logged_days() {
        let store = MemoryStore::seeded();
        let series = productivity_series(&store, "dev-123", day(2025, 4, 20), 30);

        assert_eq!(series[0].value, 0);
        // 2 of 3 tasks
        assert_eq!(series[1], ProductivityPoint { date: day(2025, 4, 19), value: 7 });
        assert_eq!(series[2], ProductivityPoint { date: day(2025, 4, 18), value: 10 });
        assert!(series[3..].iter().all(|p| p.value == 0));
    }

    #[test]
    fn series_ignores_other_users() {
        let store = MemoryStore::seeded();
        let series = productivity_series(&store, "dev-456", day(2025, 4, 19), 2);
        // 1 of 2 tasks
        assert_eq!(series[0].value, 5);
        assert_eq!(series[1].value, 0);
    }

    #[test]
    fn series_follows_the_clock() {
        let mut clock = MockClock::new();
        clock.expect_today().returning(|| day(2025, 4, 19));

        let store = MemoryStore::seeded();
        let first = productivity_series(&store, "dev-123", clock.today(), 30);
        let second = productivity_series(&store, "dev-123", clock.today(), 30);
        assert_eq!(first, second);
        assert_eq!(first[0].value, 7);
    }

    #[test]
    fn zero_window_is_empty() {
        let store = MemoryStore::seeded();
        assert!(productivity_series(&store, "dev-123", day(2025, 4, 19), 0).is_empty());
    }

    #[test]
    fn intensity_scales_to_one() {
        let point = ProductivityPoint { date: day(2025, 1, 1), value: 7 };
        assert!((heatmap_intensity(&point) - 0.7).abs() < f64::EPSILON);
    }
}
