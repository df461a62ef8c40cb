// Top Level Constants

/// Calendar days used for annualizing window returns. Plain 365; leap days
/// are noise at this resolution.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// A window year needs at least this many trading bars, no matter how short
/// the phase is.
pub const MIN_BARS_ABSOLUTE: usize = 3;

/// ...and at least this fraction of the phase length covered by trading bars.
/// Below this the first/last close straddle a data hole, not a season.
pub const MIN_BARS_COVERAGE: f64 = 0.6;

/// Yearly moves beyond +-100% are treated as data artifacts (bad rows,
/// unadjusted splits) and dropped with a warning.
pub const MAX_SANE_MOVE: f64 = 1.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub mod dirs {
    /// Default location of raw per-asset CSV files (one file per asset).
    pub const DATA_DIR: &str = "data/raw";
    /// Default destination for exported result sheets.
    pub const EXPORT_DIR: &str = "exports";
}

/// Optional user-table override file (JSON map of username -> entry).
/// Builtin demo accounts apply when it does not exist.
pub const USERS_FILE: &str = "users.json";

/// Environment variables the CLI falls back to when --user/--password are
/// not given.
pub const ENV_USER: &str = "SEASON_SCOUT_USER";
pub const ENV_PASSWORD: &str = "SEASON_SCOUT_PASSWORD";
