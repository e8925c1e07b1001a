use std::{fmt::Display, ops::Deref};

/// Whole percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percentage(u8);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    /// Share of `part` in `whole`. An empty whole counts as 0%.
    pub fn of(part: u32, whole: u32) -> Percentage {
        Percentage(rounded_ratio(part, whole, 100).min(100) as u8)
    }
}

impl Deref for Percentage {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Computes `round(scale * part / whole)` rounding halves up, without going through floats.
/// Returns 0 when `whole` is 0.
pub fn rounded_ratio(part: u32, whole: u32, scale: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole, scale) = (part as u64, whole as u64, scale as u64);
    ((2 * part * scale + whole) / (2 * whole)) as u32
}
