mod csv_loader;
mod export;

pub use csv_loader::{available_assets, clean_symbol, data_file, load_series};
pub use export::{export_results, render_table};
