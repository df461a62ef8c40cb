// Scanner and per-window statistics
pub mod scanner;
mod window_stats;

pub use scanner::SeasonalityScanner;
