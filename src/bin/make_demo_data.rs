//! Writes synthetic daily OHLC CSVs with a planted seasonal drift so the
//! scanner can be exercised without real market data.
//!
//! Fixed seeds: re-running produces byte-identical files.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::PathBuf;

use season_scout::config::constants;

const FIRST_YEAR: i32 = 2010;
const LAST_YEAR: i32 = 2024;

/// (asset, planted start day-of-year, planted length, total drift over the phase)
const DEMO_ASSETS: &[(&str, u16, u32, f64)] = &[
    ("DEMO_EURUSD", 15, 14, 0.03),
    ("DEMO_GBPUSD", 120, 21, -0.04),
    ("DEMO_USDJPY", 300, 10, 0.02),
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(constants::dirs::DATA_DIR));

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    log::info!(
        "Writing {} demo assets ({}-{}) to {}",
        DEMO_ASSETS.len(),
        FIRST_YEAR,
        LAST_YEAR,
        out_dir.display(),
    );

    for (idx, &(asset, start_day, length, drift)) in DEMO_ASSETS.iter().enumerate() {
        let path = out_dir.join(format!("{}.csv", asset));
        let mut writer =
            csv::Writer::from_path(&path).with_context(|| format!("cannot write {}", path.display()))?;
        writer.write_record(["date", "open", "high", "low", "close", "volume"])?;

        let mut rng = StdRng::seed_from_u64(0x5EA5_0000 + idx as u64);
        let mut close = 100.0_f64;
        let mut rows = 0usize;

        let mut date = NaiveDate::from_ymd_opt(FIRST_YEAR, 1, 1)
            .context("bad first year")?;
        let end = NaiveDate::from_ymd_opt(LAST_YEAR, 12, 31).context("bad last year")?;

        while date <= end {
            // Skip weekends like a real daily feed
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let open = close;

                // Noise plus the planted drift inside the seasonal phase
                let mut step = rng.gen_range(-0.004..0.004);
                let doy = date.ordinal() as u16;
                if doy >= start_day && (doy as u32) < start_day as u32 + length {
                    step += drift / length as f64;
                }
                close = (open * (1.0 + step)).max(0.01);

                let wick = rng.gen_range(0.0..0.003);
                let high = open.max(close) * (1.0 + wick);
                let low = open.min(close) * (1.0 - wick);
                let volume: f64 = rng.gen_range(1_000.0..5_000.0);

                writer.write_record([
                    date.format(constants::DATE_FORMAT).to_string(),
                    format!("{:.5}", open),
                    format!("{:.5}", high),
                    format!("{:.5}", low),
                    format!("{:.5}", close),
                    format!("{:.0}", volume),
                ])?;
                rows += 1;
            }
            date += Duration::days(1);
        }

        writer.flush()?;
        log::info!(
            "{}: {} rows, phase day {} / {}d, drift {:+.1}%",
            asset,
            rows,
            start_day,
            length,
            drift * 100.0,
        );
    }

    log::info!("Done. Try: season-scout --user analyst --password <pw> scan");
    Ok(())
}
