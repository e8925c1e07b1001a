use std::fmt::Write;

use ansi_term::Colour;

use crate::{aggregation::productivity::heatmap_intensity, store::entities::ProductivityPoint};

/// Number of days shown in the grid, 4 weeks.
pub const HEATMAP_DAYS: usize = 28;
const ROW_LENGTH: usize = 7;
const CELL: &str = "■ ";

/// 256-colour greens, from faint to strong.
const LEVELS: [u8; 5] = [22, 28, 34, 40, 46];
const EMPTY: u8 = 238;

fn cell_colour(point: &ProductivityPoint) -> Colour {
    if point.value == 0 {
        return Colour::Fixed(EMPTY);
    }
    let level = (heatmap_intensity(point) * LEVELS.len() as f64).ceil() as usize;
    Colour::Fixed(LEVELS[level.clamp(1, LEVELS.len()) - 1])
}

/// Renders the most recent [HEATMAP_DAYS] points as a grid, newest in the top left corner,
/// followed by a "Less .. More" legend.
pub fn render_heatmap(series: &[ProductivityPoint]) -> String {
    let mut output = String::new();
    for row in series[..series.len().min(HEATMAP_DAYS)].chunks(ROW_LENGTH) {
        let _ = write!(output, "  ");
        for point in row {
            let _ = write!(output, "{}", cell_colour(point).paint(CELL));
        }
        let _ = writeln!(output);
    }

    let _ = write!(output, "  Less ");
    for level in LEVELS {
        let _ = write!(output, "{}", Colour::Fixed(level).paint(CELL));
    }
    let _ = writeln!(output, "More");
    output
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn series(values: &[u8]) -> Vec<ProductivityPoint> {
        let today = NaiveDate::from_ymd_opt(2025, 4, 19).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, value)| ProductivityPoint {
                date: today - Duration::days(i as i64),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn grid_is_four_weeks() {
        let rendered = render_heatmap(&series(&[0; 30]));
        // 4 rows and the legend
        assert_eq!(rendered.lines().count(), 5);
        assert!(rendered.lines().last().unwrap().contains("Less"));
    }

    #[test]
    fn colours_follow_values() {
        let points = series(&[0, 1, 2, 7, 10]);
        assert_eq!(cell_colour(&points[0]), Colour::Fixed(EMPTY));
        assert_eq!(cell_colour(&points[1]), Colour::Fixed(22));
        assert_eq!(cell_colour(&points[2]), Colour::Fixed(22));
        assert_eq!(cell_colour(&points[3]), Colour::Fixed(40));
        assert_eq!(cell_colour(&points[4]), Colour::Fixed(46));
    }
}
