// Core modules
pub mod analysis;
pub mod auth;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::SeasonalityScanner;
pub use config::{Direction, ScanConfig};
pub use domain::{DailyBar, PriceSeries, SeasonalWindow};
pub use models::WindowResult;

// CLI argument parsing
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_SCAN, PhaseLengthRange, StartDayRange, constants};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Username (falls back to SEASON_SCOUT_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Password (falls back to SEASON_SCOUT_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Directory holding per-asset CSV files
    #[arg(long, global = true, default_value = constants::dirs::DATA_DIR)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan assets for recurring seasonal windows
    Scan(ScanArgs),

    /// List assets that have a data file
    Assets,

    /// Print the SHA-256 hash for a new user-table entry
    HashPassword {
        /// Plaintext password to hash
        password: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Assets to scan (default: everything in the data dir)
    pub assets: Vec<String>,

    /// Trade direction to evaluate (long or short)
    #[arg(long, default_value = "long")]
    pub direction: Direction,

    /// Discard windows below this full-history win rate (0..1)
    #[arg(long, default_value_t = DEFAULT_SCAN.min_win_rate)]
    pub min_win_rate: f64,

    /// Return cutoff a year must beat to count towards the streak
    #[arg(long, default_value_t = DEFAULT_SCAN.win_rate_threshold)]
    pub win_rate_threshold: f64,

    /// Discard windows observed in fewer years than this
    #[arg(long, default_value_t = DEFAULT_SCAN.min_years)]
    pub min_years: usize,

    /// Trailing years for the cycle win rate
    #[arg(long, default_value_t = DEFAULT_SCAN.cycle_years)]
    pub cycle_years: usize,

    /// Allowed cycle win-rate lag before a pattern counts as decaying
    #[arg(long, default_value_t = DEFAULT_SCAN.cycle_tolerance)]
    pub cycle_tolerance: f64,

    /// Only show phases starting within this many days from today
    #[arg(long, default_value_t = DEFAULT_SCAN.forward_horizon_days)]
    pub horizon: u32,

    /// First candidate start day-of-year (1..=366)
    #[arg(long, default_value_t = DEFAULT_SCAN.start_day_range.first)]
    pub first_start_day: u16,

    /// Last candidate start day-of-year (1..=366)
    #[arg(long, default_value_t = DEFAULT_SCAN.start_day_range.last)]
    pub last_start_day: u16,

    /// Shortest phase length in days
    #[arg(long, default_value_t = DEFAULT_SCAN.length_range.min_days)]
    pub min_length: u32,

    /// Longest phase length in days
    #[arg(long, default_value_t = DEFAULT_SCAN.length_range.max_days)]
    pub max_length: u32,

    /// Also write the result sheet as CSV
    #[arg(long)]
    pub export: bool,

    /// Destination directory for exported sheets
    #[arg(long, default_value = constants::dirs::EXPORT_DIR)]
    pub export_dir: PathBuf,
}

impl ScanArgs {
    /// Flags map onto the scan configuration 1:1; validation happens in
    /// `SeasonalityScanner::new`, not here.
    pub fn to_config(&self) -> ScanConfig {
        ScanConfig {
            direction: self.direction,
            min_win_rate: self.min_win_rate,
            win_rate_threshold: self.win_rate_threshold,
            min_years: self.min_years,
            cycle_years: self.cycle_years,
            cycle_tolerance: self.cycle_tolerance,
            forward_horizon_days: self.horizon,
            start_day_range: StartDayRange {
                first: self.first_start_day,
                last: self.last_start_day,
            },
            length_range: PhaseLengthRange {
                min_days: self.min_length,
                max_days: self.max_length,
            },
        }
    }
}
