use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::{PhaseLengthRange, StartDayRange, constants::CALENDAR_DAYS_PER_YEAR};

/// A candidate seasonal phase: "every year, from day-of-year N, for L days".
/// Pure value type: two windows with the same fields are the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonalWindow {
    /// 1..=366
    pub start_day_of_year: u16,
    /// Phase length in calendar days, >= 1
    pub length_days: u32,
}

impl SeasonalWindow {
    pub fn new(start_day_of_year: u16, length_days: u32) -> Self {
        Self {
            start_day_of_year,
            length_days,
        }
    }

    /// How many non-overlapping phases of this length fit in a year.
    /// Drives the sqrt() annualization factor of the risk-adjusted return.
    pub fn periods_per_year(&self) -> f64 {
        CALENDAR_DAYS_PER_YEAR / self.length_days as f64
    }

    /// The full candidate grid: every start day crossed with every length.
    pub fn enumerate(start_days: &StartDayRange, lengths: &PhaseLengthRange) -> Vec<Self> {
        (start_days.first..=start_days.last)
            .cartesian_product(lengths.min_days..=lengths.max_days)
            .map(|(day, length)| Self::new(day, length))
            .collect()
    }
}

impl std::fmt::Display for SeasonalWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day {} / {}d", self.start_day_of_year, self.length_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_full_grid() {
        let windows = SeasonalWindow::enumerate(
            &StartDayRange { first: 10, last: 12 },
            &PhaseLengthRange {
                min_days: 7,
                max_days: 8,
            },
        );
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0], SeasonalWindow::new(10, 7));
        assert_eq!(windows[5], SeasonalWindow::new(12, 8));
    }

    #[test]
    fn periods_per_year_from_length() {
        let w = SeasonalWindow::new(1, 73);
        assert!((w.periods_per_year() - 5.0).abs() < 1e-12);
    }
}
