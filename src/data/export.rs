//! Result presentation: CSV export and the terminal table.
//!
//! The CSV sheet is a side artifact for spreadsheets: UTF-8, win rates as
//! `NN.N%`, returns as signed percentages. Nothing ever reads it back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tabled::{Table, settings::Style};

use crate::config::constants::EXPORT_TIMESTAMP_FORMAT;
use crate::models::WindowResult;

const CSV_HEADER: [&str; 11] = [
    "asset",
    "direction",
    "start_in_days",
    "length",
    "n_years",
    "win_rate",
    "avg_return",
    "sharpe_annualized",
    "cycle_win_rate",
    "cycle_supported",
    "longest_streak",
];

/// Writes `results` to `<export_dir>/<basename>_<timestamp>.csv` and returns
/// the full path. The timestamp is supplied by the caller so repeated exports
/// in one run land in one file family.
pub fn export_results(
    results: &[WindowResult],
    export_dir: &Path,
    basename: &str,
    timestamp: DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(export_dir)
        .with_context(|| format!("cannot create export dir {}", export_dir.display()))?;

    let filename = format!(
        "{}_{}.csv",
        basename,
        timestamp.format(EXPORT_TIMESTAMP_FORMAT)
    );
    let path = export_dir.join(filename);

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot write {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for r in results {
        writer.write_record([
            r.asset.clone(),
            r.direction.to_string(),
            r.start_in_days.to_string(),
            r.length.to_string(),
            r.n_years.to_string(),
            r.win_rate.to_string(),
            r.avg_return.to_string(),
            r.sharpe_annualized.to_string(),
            r.cycle_win_rate.to_string(),
            r.cycle_supported.to_string(),
            r.longest_streak.to_string(),
        ])?;
    }
    writer.flush()?;

    log::info!("exported {} row(s) to {}", results.len(), path.display());
    Ok(path)
}

/// The same rows as a terminal table.
pub fn render_table(results: &[WindowResult]) -> String {
    Table::new(results).with(Style::sharp()).to_string()
}
