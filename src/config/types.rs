//! Value types shared across the scanner (Immutable Blueprints)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Trade direction for a seasonal phase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    #[strum(to_string = "Long")]
    Long,
    #[strum(to_string = "Short")]
    Short,
}

impl Direction {
    /// Applies the direction sign to a raw price return.
    /// A -5% price move is a +5% outcome for a Short position.
    #[inline]
    pub fn signed(&self, raw_return: f64) -> f64 {
        match self {
            Direction::Long => raw_return,
            Direction::Short => -raw_return,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WinRate(f64);

impl WinRate {
    // A fraction of winning years, clamped between 0 and 1
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for WinRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ReturnPct(f64);

impl ReturnPct {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ReturnPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}%", self.0 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Sharpe(f64);

impl Sharpe {
    /// Sharpe values beyond this are data artifacts, not signal.
    pub const CAP: f64 = 10.0;

    pub const ZERO: Self = Self(0.0);

    /// Builds a Sharpe ratio clamped to +-CAP. Non-finite input collapses to 0.
    pub fn clamped(val: f64) -> Self {
        if !val.is_finite() {
            return Self(0.0);
        }
        Self(val.clamp(-Self::CAP, Self::CAP))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Sharpe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
