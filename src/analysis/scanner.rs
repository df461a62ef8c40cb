//! The seasonality scanner.
//!
//! # Approach
//! One scan = one validated [`ScanConfig`] applied to one immutable
//! [`PriceSeries`]:
//!
//! 1. The candidate grid (start day x phase length) is enumerated up front.
//! 2. Windows are evaluated in parallel with rayon. Each window only reads
//!    the shared series and produces at most one [`WindowResult`], so the
//!    merge is a plain ordered collect: no locking anywhere.
//! 3. Filters: the projected start must fall inside the forward horizon,
//!    the window must be observed in at least `min_years` years, and the
//!    full-history win rate must clear `min_win_rate`. Windows failing the
//!    year floor are silently dropped: thin data is not an error.
//! 4. Survivors are sorted by win rate descending, average return breaking
//!    ties.
//!
//! `today` is resolved once by the caller and passed in, never read from the
//! clock here: re-running a scan with identical inputs yields an identical
//! result list, which the tests rely on.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::{
    analysis::window_stats::{evaluate, yearly_outcomes},
    config::{ConfigError, ReturnPct, ScanConfig, Sharpe, WinRate},
    domain::{PriceSeries, SeasonalWindow},
    models::WindowResult,
    utils::days_until_start,
};

pub struct SeasonalityScanner {
    config: ScanConfig,
}

impl SeasonalityScanner {
    /// Builds a scanner from a validated configuration. Bad bounds are
    /// rejected here, before any data is touched.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans one asset. An empty series yields an empty result set.
    pub fn scan(&self, series: &PriceSeries, today: NaiveDate) -> Vec<WindowResult> {
        if series.is_empty() {
            return Vec::new();
        }

        let windows =
            SeasonalWindow::enumerate(&self.config.start_day_range, &self.config.length_range);

        log::debug!(
            "{}: scanning {} candidate windows over {} bars",
            series.symbol(),
            windows.len(),
            series.len(),
        );

        let mut results: Vec<WindowResult> = windows
            .into_par_iter()
            .filter_map(|window| self.evaluate_window(series, &window, today))
            .collect();

        sort_results(&mut results);

        log::info!(
            "{}: {} seasonal windows passed the filters",
            series.symbol(),
            results.len(),
        );
        results
    }

    /// Scans several assets and merges the result lists under the same
    /// ordering. Per-asset scan order does not matter: every row is
    /// independent and the final sort is stable.
    pub fn scan_assets(&self, series_list: &[PriceSeries], today: NaiveDate) -> Vec<WindowResult> {
        let mut all = Vec::new();
        for series in series_list {
            all.extend(self.scan(series, today));
        }
        sort_results(&mut all);
        all
    }

    fn evaluate_window(
        &self,
        series: &PriceSeries,
        window: &SeasonalWindow,
        today: NaiveDate,
    ) -> Option<WindowResult> {
        let cfg = &self.config;

        // Horizon check first: it needs no data at all.
        let start_in_days = days_until_start(window.start_day_of_year, today);
        if start_in_days > cfg.forward_horizon_days {
            return None;
        }

        let outcomes = yearly_outcomes(series, window, cfg.direction);
        let stats = evaluate(&outcomes, window, cfg)?;

        if stats.n_years < cfg.min_years {
            return None;
        }
        if stats.win_rate < cfg.min_win_rate {
            return None;
        }

        Some(WindowResult {
            asset: series.symbol().to_string(),
            direction: cfg.direction,
            start_in_days,
            length: window.length_days,
            n_years: stats.n_years,
            win_rate: WinRate::new(stats.win_rate),
            avg_return: ReturnPct::new(stats.avg_return),
            sharpe_annualized: stats.sharpe_annualized,
            cycle_win_rate: WinRate::new(stats.cycle_win_rate),
            cycle_supported: stats.cycle_supported,
            longest_streak: stats.longest_streak,
        })
    }
}

/// Win rate descending, average return descending on ties. Stable, so equal
/// rows keep their (deterministic) generation order.
fn sort_results(results: &mut [WindowResult]) {
    results.sort_by(|a, b| {
        b.win_rate
            .value()
            .partial_cmp(&a.win_rate.value())
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.avg_return
                    .value()
                    .partial_cmp(&a.avg_return.value())
                    .unwrap_or(Ordering::Equal)
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SCAN, Direction, PhaseLengthRange, StartDayRange};
    use crate::domain::DailyBar;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Daily bars covering `days` days of `year` from Jan 1.
    fn year_of_bars(year: i32, days: u32, close_fn: impl Fn(u32) -> f64) -> Vec<DailyBar> {
        (0..days)
            .map(|i| {
                let date = d(year, 1, 1) + Duration::days(i as i64);
                let close = close_fn(i);
                DailyBar::new(date, close, close, close, close, 0.0)
            })
            .collect()
    }

    fn narrow_config() -> ScanConfig {
        ScanConfig {
            min_win_rate: 0.0,
            start_day_range: StartDayRange { first: 1, last: 1 },
            length_range: PhaseLengthRange {
                min_days: 10,
                max_days: 10,
            },
            forward_horizon_days: 366,
            ..DEFAULT_SCAN
        }
    }

    #[test]
    fn empty_series_yields_empty_results() {
        let scanner = SeasonalityScanner::new(narrow_config()).unwrap();
        let series = PriceSeries::from_bars("EMPTY", vec![]).unwrap();
        assert!(scanner.scan(&series, d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let cfg = ScanConfig {
            length_range: PhaseLengthRange {
                min_days: 20,
                max_days: 10,
            },
            ..DEFAULT_SCAN
        };
        assert!(SeasonalityScanner::new(cfg).is_err());
    }

    #[test]
    fn flat_series_scores_zero_everywhere() {
        let mut bars = Vec::new();
        for year in 2016..=2023 {
            bars.extend(year_of_bars(year, 60, |_| 100.0));
        }
        let series = PriceSeries::from_bars("FLAT", bars).unwrap();

        let scanner = SeasonalityScanner::new(narrow_config()).unwrap();
        let results = scanner.scan(&series, d(2024, 1, 1));

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.avg_return.value(), 0.0);
        assert_eq!(r.sharpe_annualized, Sharpe::ZERO);
        assert_eq!(r.win_rate.value(), 0.0);
        assert_eq!(r.n_years, 8);
    }

    #[test]
    fn horizon_filter_drops_far_windows() {
        let mut bars = Vec::new();
        for year in 2016..=2023 {
            bars.extend(year_of_bars(year, 200, |_| 100.0));
        }
        let series = PriceSeries::from_bars("FLAT", bars).unwrap();

        let cfg = ScanConfig {
            min_win_rate: 0.0,
            start_day_range: StartDayRange {
                first: 100,
                last: 100,
            },
            length_range: PhaseLengthRange {
                min_days: 10,
                max_days: 10,
            },
            forward_horizon_days: 10,
            ..DEFAULT_SCAN
        };
        let scanner = SeasonalityScanner::new(cfg).unwrap();

        // Day 100 from Jan 1 is 99 days out, well past a 10-day horizon
        assert!(scanner.scan(&series, d(2024, 1, 1)).is_empty());
        // ...but within reach from day 95
        let near_today = d(2024, 4, 4); // doy 95 in a leap year
        assert_eq!(scanner.scan(&series, near_today).len(), 1);
    }

    #[test]
    fn direction_reversal_mirrors_stats() {
        // Drifts up 1% over the window every year
        let mut bars = Vec::new();
        for year in 2016..=2023 {
            bars.extend(year_of_bars(year, 60, |i| 100.0 + 0.1 * i.min(10) as f64));
        }
        let series = PriceSeries::from_bars("DRIFT", bars).unwrap();

        let long = SeasonalityScanner::new(narrow_config()).unwrap();
        let short = SeasonalityScanner::new(ScanConfig {
            direction: Direction::Short,
            ..narrow_config()
        })
        .unwrap();

        let today = d(2024, 1, 1);
        let lr = &long.scan(&series, today)[0];
        let sr = &short.scan(&series, today)[0];

        assert!((lr.avg_return.value() + sr.avg_return.value()).abs() < 1e-12);
        assert!((lr.win_rate.value() - (1.0 - sr.win_rate.value())).abs() < 1e-12);
    }

    #[test]
    fn results_sorted_by_win_rate_then_return() {
        let mut results = vec![
            WindowResult {
                asset: "A".into(),
                direction: Direction::Long,
                start_in_days: 0,
                length: 10,
                n_years: 5,
                win_rate: WinRate::new(0.8),
                avg_return: ReturnPct::new(0.01),
                sharpe_annualized: Sharpe::ZERO,
                cycle_win_rate: WinRate::new(0.8),
                cycle_supported: true,
                longest_streak: 2,
            },
            WindowResult {
                asset: "B".into(),
                direction: Direction::Long,
                start_in_days: 0,
                length: 10,
                n_years: 5,
                win_rate: WinRate::new(0.9),
                avg_return: ReturnPct::new(0.005),
                sharpe_annualized: Sharpe::ZERO,
                cycle_win_rate: WinRate::new(0.9),
                cycle_supported: true,
                longest_streak: 2,
            },
            WindowResult {
                asset: "C".into(),
                direction: Direction::Long,
                start_in_days: 0,
                length: 10,
                n_years: 5,
                win_rate: WinRate::new(0.8),
                avg_return: ReturnPct::new(0.02),
                sharpe_annualized: Sharpe::ZERO,
                cycle_win_rate: WinRate::new(0.8),
                cycle_supported: true,
                longest_streak: 2,
            },
        ];
        sort_results(&mut results);
        let order: Vec<&str> = results.iter().map(|r| r.asset.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }
}
