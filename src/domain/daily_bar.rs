use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One daily OHLC bar. Volume is 0 for forex files that don't carry it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        DailyBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    // NaN/inf anywhere in the price fields poisons every downstream statistic
    pub fn has_finite_prices(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}
