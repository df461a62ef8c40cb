//! Analysis and computation configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Direction;

/// Invalid scan parameters. Checked before any window is evaluated so a bad
/// configuration can never produce a partial result set.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: bounds are inverted ({lo}..={hi})")]
    InvertedRange {
        name: &'static str,
        lo: i64,
        hi: i64,
    },

    #[error("{name}: must be positive")]
    NonPositive { name: &'static str },

    #[error("start_day_range: day {0} is outside 1..=366")]
    StartDayOutOfBounds(u16),

    #[error("{name}: {value} is outside 0.0..=1.0")]
    RatioOutOfRange { name: &'static str, value: f64 },
}

/// Inclusive day-of-year range for candidate phase starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartDayRange {
    pub first: u16,
    pub last: u16,
}

/// Inclusive phase-length range in calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseLengthRange {
    pub min_days: u32,
    pub max_days: u32,
}

/// The Master Scan Configuration
///
/// Owned by the caller (CLI flags map onto it 1:1); the scanner itself only
/// ever sees a validated copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub direction: Direction,

    /// Windows below this full-history win rate are discarded.
    pub min_win_rate: f64,

    /// Return cutoff a year must beat to count towards the longest streak.
    pub win_rate_threshold: f64,

    /// Windows observed in fewer years than this are discarded (statistical
    /// relevance floor).
    pub min_years: usize,

    /// Trailing years used for the cycle (regime-drift) win rate.
    pub cycle_years: usize,

    /// Cycle support tolerance: the trailing win rate may lag the full-history
    /// win rate by at most this much.
    pub cycle_tolerance: f64,

    /// Only keep windows starting within this many days from "today".
    pub forward_horizon_days: u32,

    pub start_day_range: StartDayRange,
    pub length_range: PhaseLengthRange,
}

impl ScanConfig {
    /// Validates all bounds. Runs before scanning starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = &self.length_range;
        if lengths.min_days == 0 {
            return Err(ConfigError::NonPositive {
                name: "length_range.min_days",
            });
        }
        if lengths.min_days > lengths.max_days {
            return Err(ConfigError::InvertedRange {
                name: "length_range",
                lo: lengths.min_days as i64,
                hi: lengths.max_days as i64,
            });
        }

        let days = &self.start_day_range;
        if !(1..=366).contains(&days.first) {
            return Err(ConfigError::StartDayOutOfBounds(days.first));
        }
        if !(1..=366).contains(&days.last) {
            return Err(ConfigError::StartDayOutOfBounds(days.last));
        }
        if days.first > days.last {
            return Err(ConfigError::InvertedRange {
                name: "start_day_range",
                lo: days.first as i64,
                hi: days.last as i64,
            });
        }

        if self.min_years == 0 {
            return Err(ConfigError::NonPositive { name: "min_years" });
        }
        if self.cycle_years == 0 {
            return Err(ConfigError::NonPositive { name: "cycle_years" });
        }

        for (name, value) in [
            ("min_win_rate", self.min_win_rate),
            ("cycle_tolerance", self.cycle_tolerance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { name, value });
            }
        }

        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        DEFAULT_SCAN
    }
}

pub const DEFAULT_SCAN: ScanConfig = ScanConfig {
    direction: Direction::Long,
    min_win_rate: 0.75,
    // Streak years must simply be positive by default; raise to demand
    // meaningfully sized wins.
    win_rate_threshold: 0.0,
    min_years: 5,
    cycle_years: 5,
    cycle_tolerance: 0.10,
    forward_horizon_days: 10,
    start_day_range: StartDayRange { first: 1, last: 366 },
    length_range: PhaseLengthRange {
        min_days: 7,
        max_days: 30,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DEFAULT_SCAN.validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_length_range() {
        let cfg = ScanConfig {
            length_range: PhaseLengthRange {
                min_days: 30,
                max_days: 7,
            },
            ..DEFAULT_SCAN
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedRange { name: "length_range", .. })
        ));
    }

    #[test]
    fn rejects_zero_length() {
        let cfg = ScanConfig {
            length_range: PhaseLengthRange {
                min_days: 0,
                max_days: 7,
            },
            ..DEFAULT_SCAN
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn rejects_start_day_out_of_bounds() {
        let cfg = ScanConfig {
            start_day_range: StartDayRange { first: 0, last: 10 },
            ..DEFAULT_SCAN
        };
        assert_eq!(cfg.validate(), Err(ConfigError::StartDayOutOfBounds(0)));

        let cfg = ScanConfig {
            start_day_range: StartDayRange { first: 1, last: 400 },
            ..DEFAULT_SCAN
        };
        assert_eq!(cfg.validate(), Err(ConfigError::StartDayOutOfBounds(400)));
    }

    #[test]
    fn rejects_inverted_start_days() {
        let cfg = ScanConfig {
            start_day_range: StartDayRange {
                first: 200,
                last: 100,
            },
            ..DEFAULT_SCAN
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedRange { name: "start_day_range", .. })
        ));
    }

    #[test]
    fn rejects_ratio_out_of_range() {
        let cfg = ScanConfig {
            min_win_rate: 1.5,
            ..DEFAULT_SCAN
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RatioOutOfRange { name: "min_win_rate", .. })
        ));
    }

    #[test]
    fn rejects_zero_min_years() {
        let cfg = ScanConfig {
            min_years: 0,
            ..DEFAULT_SCAN
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive { name: "min_years" })
        );
    }
}
