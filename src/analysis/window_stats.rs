//! Per-window yearly outcome resolution and statistics.
//!
//! # Approach
//! A window is replayed once per calendar year present in the series:
//!
//! 1. The start day-of-year is resolved to a concrete date in that year and
//!    the end date is start + length. Years where the day does not exist
//!    (day 366 off leap years) are skipped.
//! 2. The outcome uses the closes of the nearest trading bars *inside that
//!    year*: the first bar at/after the start date and the last bar at/before
//!    the end date. A year whose window covers too few bars contributes no
//!    outcome rather than a misleading one.
//! 3. The raw return `(end_close / start_close) - 1` is signed by direction
//!    (Short flips it) and collected as a [`YearlyOutcome`].
//!
//! Aggregation over the collected outcomes produces win rate, mean return,
//! the annualized risk-adjusted ratio, the longest streak and the trailing
//! cycle win rate.

use chrono::Duration;
use statrs::statistics::Statistics;

use crate::{
    config::{
        ScanConfig, Sharpe,
        constants::{MAX_SANE_MOVE, MIN_BARS_ABSOLUTE, MIN_BARS_COVERAGE},
        Direction,
    },
    domain::{PriceSeries, SeasonalWindow},
    models::YearlyOutcome,
    utils::date_for_day_of_year,
};

/// Sample standard deviations below this are numeric dust, not dispersion.
const MIN_STDDEV: f64 = 1e-10;

/// Minimum trading bars a year must contribute inside the window.
pub(crate) fn min_bars_required(length_days: u32) -> usize {
    MIN_BARS_ABSOLUTE.max((length_days as f64 * MIN_BARS_COVERAGE) as usize)
}

/// Replays `window` across every calendar year of `series`.
/// Years without a usable window are absent from the result (never zero-filled).
pub(crate) fn yearly_outcomes(
    series: &PriceSeries,
    window: &SeasonalWindow,
    direction: Direction,
) -> Vec<YearlyOutcome> {
    let mut outcomes = Vec::new();

    for year in series.years() {
        let Some(start_date) = date_for_day_of_year(year, window.start_day_of_year) else {
            continue;
        };
        let end_date = start_date + Duration::days(window.length_days as i64);

        let range = series.year_range(year);
        let Some(first) = series.first_at_or_after(range.clone(), start_date) else {
            continue;
        };
        let Some(last) = series.last_at_or_before(range, end_date) else {
            continue;
        };
        if last < first {
            continue;
        }

        let bars_covered = last - first + 1;
        if bars_covered < min_bars_required(window.length_days) {
            continue;
        }

        let start_close = series.closes()[first];
        let end_close = series.closes()[last];
        if start_close <= 0.0 || end_close <= 0.0 {
            continue;
        }

        let raw_return = end_close / start_close - 1.0;
        if raw_return.abs() > MAX_SANE_MOVE {
            log::warn!(
                "{}: filtered extreme move {:+.1}% in {} ({})",
                series.symbol(),
                raw_return * 100.0,
                year,
                window,
            );
            continue;
        }

        outcomes.push(YearlyOutcome {
            year,
            value: direction.signed(raw_return),
        });
    }

    outcomes
}

/// Aggregate statistics over one window's yearly outcomes.
#[derive(Debug, Clone)]
pub(crate) struct WindowStats {
    pub n_years: usize,
    pub win_rate: f64,
    pub avg_return: f64,
    pub sharpe_annualized: Sharpe,
    pub cycle_win_rate: f64,
    pub cycle_supported: bool,
    pub longest_streak: usize,
}

/// Returns None for an empty outcome set: win rate is undefined with zero
/// observations.
pub(crate) fn evaluate(
    outcomes: &[YearlyOutcome],
    window: &SeasonalWindow,
    cfg: &ScanConfig,
) -> Option<WindowStats> {
    if outcomes.is_empty() {
        return None;
    }

    let returns: Vec<f64> = outcomes.iter().map(|o| o.value).collect();
    let n_years = returns.len();
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    let win_rate = wins as f64 / n_years as f64;
    let avg_return = returns.iter().mean();

    let sharpe_annualized = if n_years < 2 {
        Sharpe::ZERO
    } else {
        // Sample standard deviation (N-1)
        let stddev = returns.iter().std_dev();
        if stddev > MIN_STDDEV {
            Sharpe::clamped(avg_return / stddev * window.periods_per_year().sqrt())
        } else {
            Sharpe::ZERO
        }
    };

    let longest_streak = longest_streak(outcomes, cfg.win_rate_threshold);
    let (cycle_win_rate, cycle_supported) =
        cycle_stats(&returns, win_rate, cfg.cycle_years, cfg.cycle_tolerance);

    Some(WindowStats {
        n_years,
        win_rate,
        avg_return,
        sharpe_annualized,
        cycle_win_rate,
        cycle_supported,
        longest_streak,
    })
}

/// Longest run of *adjacent* calendar years beating `return_cutoff`.
/// A gap year (no outcome) breaks the run even if both neighbours won.
pub(crate) fn longest_streak(outcomes: &[YearlyOutcome], return_cutoff: f64) -> usize {
    let mut best = 0usize;
    let mut current = 0usize;
    let mut prev_year: Option<i32> = None;

    for outcome in outcomes {
        let adjacent = prev_year.is_some_and(|p| outcome.year == p + 1);
        if outcome.value > return_cutoff {
            current = if adjacent { current + 1 } else { 1 };
        } else {
            current = 0;
        }
        // >= so an equal-length run later in history is the one we keep
        if current >= best {
            best = current;
        }
        prev_year = Some(outcome.year);
    }

    best
}

/// Win rate over the trailing `cycle_years` outcomes, plus whether it stays
/// within `tolerance` of the full-history rate (i.e. the pattern is not
/// visibly decaying).
pub(crate) fn cycle_stats(
    returns: &[f64],
    full_win_rate: f64,
    cycle_years: usize,
    tolerance: f64,
) -> (f64, bool) {
    let tail_start = returns.len().saturating_sub(cycle_years);
    let tail = &returns[tail_start..];
    let wins = tail.iter().filter(|r| **r > 0.0).count();
    let cycle_win_rate = wins as f64 / tail.len() as f64;
    let supported = cycle_win_rate >= full_win_rate - tolerance;
    (cycle_win_rate, supported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCAN;
    use crate::domain::DailyBar;
    use chrono::NaiveDate;

    fn outcome(year: i32, value: f64) -> YearlyOutcome {
        YearlyOutcome { year, value }
    }

    /// One bar per calendar day over `days` days from Jan 1, closes supplied
    /// by `close_fn(day_index)`.
    fn year_of_bars(year: i32, days: u32, close_fn: impl Fn(u32) -> f64) -> Vec<DailyBar> {
        (0..days)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
                    + Duration::days(i as i64);
                let close = close_fn(i);
                DailyBar::new(date, close, close, close, close, 0.0)
            })
            .collect()
    }

    #[test]
    fn min_bars_floor_and_coverage() {
        assert_eq!(min_bars_required(1), 3);
        assert_eq!(min_bars_required(10), 6);
        assert_eq!(min_bars_required(30), 18);
    }

    #[test]
    fn outcomes_skip_years_without_coverage() {
        // 2020 has a full January; 2021 only has 2 bars in the window
        let mut bars = year_of_bars(2020, 40, |_| 100.0);
        bars.extend(year_of_bars(2021, 2, |_| 100.0));
        let series = PriceSeries::from_bars("T", bars).unwrap();

        let window = SeasonalWindow::new(1, 10);
        let outcomes = yearly_outcomes(&series, &window, Direction::Long);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].year, 2020);
    }

    #[test]
    fn outcomes_use_first_and_last_close_in_window() {
        // Close ramps 100 -> 110 over day indices 0..=10; window end lands on
        // day index 10 (start day 1 + 10-day length).
        let bars = year_of_bars(2020, 40, |i| 100.0 + i.min(10) as f64);
        let series = PriceSeries::from_bars("T", bars).unwrap();

        let window = SeasonalWindow::new(1, 10);
        let outcomes = yearly_outcomes(&series, &window, Direction::Long);
        assert_eq!(outcomes.len(), 1);
        assert!((outcomes[0].value - 0.10).abs() < 1e-12);

        let short = yearly_outcomes(&series, &window, Direction::Short);
        assert!((short[0].value + 0.10).abs() < 1e-12);
    }

    #[test]
    fn outcomes_drop_extreme_moves() {
        // +150% inside the window reads as a data artifact
        let bars = year_of_bars(2020, 40, |i| if i >= 5 { 250.0 } else { 100.0 });
        let series = PriceSeries::from_bars("T", bars).unwrap();

        let window = SeasonalWindow::new(1, 10);
        assert!(yearly_outcomes(&series, &window, Direction::Long).is_empty());
    }

    #[test]
    fn streak_counts_adjacent_years_only() {
        let outcomes = vec![
            outcome(2015, 0.02),
            outcome(2016, 0.01),
            // 2017 missing: gap breaks the run
            outcome(2018, 0.03),
            outcome(2019, 0.02),
            outcome(2020, 0.01),
        ];
        assert_eq!(longest_streak(&outcomes, 0.0), 3);
    }

    #[test]
    fn streak_respects_return_cutoff() {
        let outcomes = vec![
            outcome(2018, 0.005),
            outcome(2019, 0.02),
            outcome(2020, 0.03),
        ];
        assert_eq!(longest_streak(&outcomes, 0.0), 3);
        assert_eq!(longest_streak(&outcomes, 0.01), 2);
        assert_eq!(longest_streak(&outcomes, 0.05), 0);
    }

    #[test]
    fn cycle_detects_decay() {
        // 8 winning years then 4 losing ones
        let returns: Vec<f64> = (0..8).map(|_| 0.02).chain((0..4).map(|_| -0.02)).collect();
        let full_wr = 8.0 / 12.0;

        let (cycle_wr, supported) = cycle_stats(&returns, full_wr, 4, 0.10);
        assert_eq!(cycle_wr, 0.0);
        assert!(!supported);

        // Wide-open tolerance always supports
        let (_, supported) = cycle_stats(&returns, full_wr, 4, 1.0);
        assert!(supported);
    }

    #[test]
    fn flat_returns_produce_zero_sharpe() {
        let outcomes: Vec<YearlyOutcome> =
            (2015..2020).map(|y| outcome(y, 0.0)).collect();
        let stats = evaluate(&outcomes, &SeasonalWindow::new(1, 10), &DEFAULT_SCAN).unwrap();
        assert_eq!(stats.avg_return, 0.0);
        assert_eq!(stats.sharpe_annualized, Sharpe::ZERO);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn single_outcome_has_no_sharpe() {
        let outcomes = vec![outcome(2020, 0.02)];
        let stats = evaluate(&outcomes, &SeasonalWindow::new(1, 10), &DEFAULT_SCAN).unwrap();
        assert_eq!(stats.n_years, 1);
        assert_eq!(stats.win_rate, 1.0);
        assert_eq!(stats.sharpe_annualized, Sharpe::ZERO);
    }

    #[test]
    fn win_rate_is_exact_fraction() {
        let outcomes = vec![
            outcome(2016, 0.02),
            outcome(2017, -0.01),
            outcome(2018, 0.03),
            outcome(2019, 0.0), // exact zero is not a win
        ];
        let stats = evaluate(&outcomes, &SeasonalWindow::new(1, 10), &DEFAULT_SCAN).unwrap();
        assert_eq!(stats.win_rate, 2.0 / 4.0);
    }

    #[test]
    fn empty_outcomes_are_undefined() {
        assert!(evaluate(&[], &SeasonalWindow::new(1, 10), &DEFAULT_SCAN).is_none());
    }
}
