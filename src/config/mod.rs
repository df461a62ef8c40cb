//! Configuration module for the seasonality scanner.

// Can all be private now because we have a public re-export.
mod analysis;
mod types;
mod users;

// Public
pub mod constants;

// Re-export commonly used items
pub use analysis::{
    ConfigError, DEFAULT_SCAN, PhaseLengthRange, ScanConfig, StartDayRange,
};
pub use types::{Direction, ReturnPct, Sharpe, WinRate};
pub use users::{BUILTIN_USERS, UserEntry};
