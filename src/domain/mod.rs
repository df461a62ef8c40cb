// Domain types and value objects
mod daily_bar;
mod series;
mod window;

// Re-export commonly used types
pub use daily_bar::DailyBar;
pub use series::{DataQualityError, PriceSeries};
pub use window::SeasonalWindow;
