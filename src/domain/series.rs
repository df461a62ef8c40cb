//! Validated daily price history for one asset.
//!
//! # Approach
//! A [`PriceSeries`] is built once from loader output and is immutable from
//! then on. Construction is the data-quality gate the scanner relies on:
//! duplicate dates, out-of-order dates and non-finite values are rejected
//! here with a [`DataQualityError`], so the scan itself never has to
//! re-validate and can never emit statistics skewed by a half-broken file.
//! An *empty* series is valid: it simply produces an empty result set.
//!
//! Storage is columnar (one Vec per field) like the rest of the pipeline
//! expects; [`PriceSeries::bar`] materializes a row view on demand.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::DailyBar;

/// Input data unfit for scanning. Carries the asset and the offending date so
/// the caller can log something actionable.
#[derive(Debug, Error, PartialEq)]
pub enum DataQualityError {
    #[error("{symbol}: duplicate trading date {date}")]
    DuplicateDate { symbol: String, date: NaiveDate },

    #[error("{symbol}: trading dates not increasing at {date}")]
    NonMonotonicDate { symbol: String, date: NaiveDate },

    #[error("{symbol}: non-finite price field in bar dated {date}")]
    NonFinitePrice { symbol: String, date: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    dates: Vec<NaiveDate>,
    opens: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
    closes: Vec<f64>,
    volumes: Vec<f64>,
}

impl PriceSeries {
    /// Builds a series from loader output, enforcing the data-quality
    /// invariants: strictly increasing unique dates, finite prices.
    pub fn from_bars(
        symbol: impl Into<String>,
        bars: Vec<DailyBar>,
    ) -> Result<Self, DataQualityError> {
        let symbol = symbol.into();
        let len = bars.len();

        let mut dates = Vec::with_capacity(len);
        let mut opens = Vec::with_capacity(len);
        let mut highs = Vec::with_capacity(len);
        let mut lows = Vec::with_capacity(len);
        let mut closes = Vec::with_capacity(len);
        let mut volumes = Vec::with_capacity(len);

        let mut prev_date: Option<NaiveDate> = None;
        for bar in &bars {
            if !bar.has_finite_prices() {
                return Err(DataQualityError::NonFinitePrice {
                    symbol,
                    date: bar.date,
                });
            }
            if let Some(prev) = prev_date {
                if bar.date == prev {
                    return Err(DataQualityError::DuplicateDate {
                        symbol,
                        date: bar.date,
                    });
                }
                if bar.date < prev {
                    return Err(DataQualityError::NonMonotonicDate {
                        symbol,
                        date: bar.date,
                    });
                }
            }
            prev_date = Some(bar.date);

            dates.push(bar.date);
            opens.push(bar.open);
            highs.push(bar.high);
            lows.push(bar.low);
            closes.push(bar.close);
            volumes.push(bar.volume);
        }

        Ok(Self {
            symbol,
            dates,
            opens,
            highs,
            lows,
            closes,
            volumes,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub(crate) fn bar(&self, idx: usize) -> DailyBar {
        DailyBar::new(
            self.dates[idx],
            self.opens[idx],
            self.highs[idx],
            self.lows[idx],
            self.closes[idx],
            self.volumes[idx],
        )
    }

    /// Calendar years present in the series, ascending. Gap years (no bars)
    /// simply do not appear.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for date in &self.dates {
            let y = date.year();
            if years.last() != Some(&y) {
                years.push(y);
            }
        }
        years
    }

    /// Index range of the bars belonging to `year`. Dates are strictly
    /// increasing, so a calendar year is always one contiguous block.
    pub fn year_range(&self, year: i32) -> std::ops::Range<usize> {
        let start = self.dates.partition_point(|d| d.year() < year);
        let end = self.dates.partition_point(|d| d.year() <= year);
        start..end
    }

    /// First index within `range` whose date is on or after `date`.
    pub(crate) fn first_at_or_after(
        &self,
        range: std::ops::Range<usize>,
        date: NaiveDate,
    ) -> Option<usize> {
        let offset = self.dates[range.clone()].partition_point(|d| *d < date);
        let idx = range.start + offset;
        (idx < range.end).then_some(idx)
    }

    /// Last index within `range` whose date is on or before `date`.
    pub(crate) fn last_at_or_before(
        &self,
        range: std::ops::Range<usize>,
        date: NaiveDate,
    ) -> Option<usize> {
        let offset = self.dates[range.clone()].partition_point(|d| *d <= date);
        (offset > 0).then(|| range.start + offset - 1)
    }
}
