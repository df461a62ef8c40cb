//! CSV loading for per-asset OHLC files.
//!
//! One file per asset in the data directory, `date,open,high,low,close,volume`
//! with ISO dates. Symbols are cleaned for the filesystem the same way the
//! download tooling writes them (`EURUSD=X` -> `EURUSD_X.csv`). Rows with
//! missing OHLC fields are dropped here; everything structural (ordering,
//! duplicates, non-finite values) is left to the [`PriceSeries`] constructor
//! so the data-quality gate lives in exactly one place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::constants::DATE_FORMAT;
use crate::domain::{DailyBar, PriceSeries};

const REQUIRED_COLUMNS: [&str; 5] = ["date", "open", "high", "low", "close"];

/// Filesystem-safe variant of an asset symbol.
pub fn clean_symbol(symbol: &str) -> String {
    symbol.replace(['=', '/'], "_")
}

pub fn data_file(data_dir: &Path, symbol: &str) -> PathBuf {
    data_dir.join(format!("{}.csv", clean_symbol(symbol)))
}

/// Asset names that have a data file, sorted. The file stem *is* the asset
/// identifier.
pub fn available_assets(data_dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("data dir {} not readable: {}", data_dir.display(), e);
            return Vec::new();
        }
    };

    let mut assets: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                return None;
            }
            path.file_stem().map(|s| s.to_string_lossy().into_owned())
        })
        .collect();

    assets.sort();
    assets
}

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    // Downloaded files sometimes carry a full timestamp; the date prefix is
    // all we keep.
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

/// Loads one asset's history and runs it through the data-quality gate.
pub fn load_series(data_dir: &Path, symbol: &str) -> Result<PriceSeries> {
    let path = data_file(data_dir, symbol);
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("no data file for {} at {}", symbol, path.display()))?;

    // Tolerate capitalized headers from other tooling
    let headers: csv::StringRecord = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!(
                "{}: missing required column '{}' (found: {:?})",
                path.display(),
                required,
                headers,
            );
        }
    }
    rdr.set_headers(headers);

    let mut bars = Vec::new();
    let mut dropped = 0usize;
    for (row_idx, row) in rdr.deserialize::<RawRow>().enumerate() {
        let row = row.with_context(|| format!("{}: row {}", path.display(), row_idx + 2))?;

        let (Some(open), Some(high), Some(low), Some(close)) =
            (row.open, row.high, row.low, row.close)
        else {
            dropped += 1;
            continue;
        };

        let Some(date) = parse_date(&row.date) else {
            bail!(
                "{}: row {}: unparseable date '{}'",
                path.display(),
                row_idx + 2,
                row.date,
            );
        };

        bars.push(DailyBar::new(
            date,
            open,
            high,
            low,
            close,
            row.volume.unwrap_or(0.0),
        ));
    }

    if dropped > 0 {
        log::info!("{}: dropped {} row(s) with missing OHLC fields", symbol, dropped);
    }
    log::info!("{}: loaded {} bars from {}", symbol, bars.len(), path.display());

    Ok(PriceSeries::from_bars(symbol, bars)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::fs;

    fn temp_data_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("season-scout-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn cleans_symbols_for_filenames() {
        assert_eq!(clean_symbol("EURUSD=X"), "EURUSD_X");
        assert_eq!(clean_symbol("BTC/USD"), "BTC_USD");
        assert_eq!(clean_symbol("SPY"), "SPY");
    }

    #[test]
    fn loads_well_formed_file() {
        let dir = temp_data_dir();
        fs::write(
            dir.join("DEMO.csv"),
            "date,open,high,low,close,volume\n\
             2020-01-02,1.0,1.2,0.9,1.1,1000\n\
             2020-01-03,1.1,1.3,1.0,1.2,1100\n",
        )
        .unwrap();

        let series = load_series(&dir, "DEMO").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), &[1.1, 1.2]);
        assert_eq!(series.first_date().unwrap().year(), 2020);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn tolerates_capitalized_headers_and_missing_volume() {
        let dir = temp_data_dir();
        fs::write(
            dir.join("NOVOL.csv"),
            "Date,Open,High,Low,Close\n2020-01-02,1.0,1.2,0.9,1.1\n",
        )
        .unwrap();

        let series = load_series(&dir, "NOVOL").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.bar(0).volume, 0.0);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn drops_rows_with_missing_ohlc() {
        let dir = temp_data_dir();
        fs::write(
            dir.join("HOLEY.csv"),
            "date,open,high,low,close,volume\n\
             2020-01-02,1.0,1.2,0.9,1.1,0\n\
             2020-01-03,,,,,\n\
             2020-01-06,1.1,1.3,1.0,1.2,0\n",
        )
        .unwrap();

        let series = load_series(&dir, "HOLEY").unwrap();
        assert_eq!(series.len(), 2);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn duplicate_dates_fail_the_quality_gate() {
        let dir = temp_data_dir();
        fs::write(
            dir.join("DUPED.csv"),
            "date,open,high,low,close,volume\n\
             2020-01-02,1.0,1.2,0.9,1.1,0\n\
             2020-01-02,1.1,1.3,1.0,1.2,0\n",
        )
        .unwrap();

        let err = load_series(&dir, "DUPED").unwrap_err();
        assert!(err.to_string().contains("duplicate trading date"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn timestamped_dates_keep_the_date_part() {
        assert_eq!(
            parse_date("2020-01-02 00:00:00+00:00"),
            NaiveDate::from_ymd_opt(2020, 1, 2),
        );
        assert_eq!(parse_date("not-a-date"), None);
    }

    #[test]
    fn lists_available_assets_sorted() {
        let dir = temp_data_dir();
        fs::write(dir.join("GBPUSD_X.csv"), "date,open,high,low,close\n").unwrap();
        fs::write(dir.join("AUDUSD_X.csv"), "date,open,high,low,close\n").unwrap();
        fs::write(dir.join("notes.txt"), "not data").unwrap();

        assert_eq!(available_assets(&dir), vec!["AUDUSD_X", "GBPUSD_X"]);
        assert!(available_assets(&dir.join("missing")).is_empty());

        fs::remove_dir_all(dir).ok();
    }
}
