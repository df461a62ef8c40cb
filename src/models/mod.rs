mod window_result;

pub use window_result::{WindowResult, YearlyOutcome};
