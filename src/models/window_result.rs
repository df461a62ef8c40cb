use serde::Serialize;
use tabled::Tabled;

use crate::config::{Direction, ReturnPct, Sharpe, WinRate};

/// The realized outcome of one seasonal window in one calendar year.
/// Years without usable trading bars contribute no outcome at all: a missing
/// year is *not* a zero-return year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyOutcome {
    pub year: i32,
    /// Direction-signed fractional return over the window.
    pub value: f64,
}

/// Aggregate statistics for one window, recomputed on every scan.
/// Not persisted as authoritative state: the CSV export is a side artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct WindowResult {
    #[tabled(rename = "Asset")]
    pub asset: String,

    #[tabled(rename = "Dir")]
    pub direction: Direction,

    /// Days from "today" until the phase next begins (0 = today).
    #[tabled(rename = "Start In")]
    pub start_in_days: u32,

    /// Phase length in calendar days.
    #[tabled(rename = "Len")]
    pub length: u32,

    #[tabled(rename = "Years")]
    pub n_years: usize,

    #[tabled(rename = "Win Rate")]
    pub win_rate: WinRate,

    #[tabled(rename = "Avg Return")]
    pub avg_return: ReturnPct,

    #[tabled(rename = "Sharpe (ann.)")]
    pub sharpe_annualized: Sharpe,

    #[tabled(rename = "Cycle WR")]
    pub cycle_win_rate: WinRate,

    #[tabled(rename = "Cycle OK")]
    pub cycle_supported: bool,

    #[tabled(rename = "Streak")]
    pub longest_streak: usize,
}
