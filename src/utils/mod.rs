mod time_utils;

pub use time_utils::{date_for_day_of_year, days_in_year, days_until_start, is_leap_year};
