use std::{env, panic, path::Path};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use season_scout::{
    Cli, Command, PriceSeries, ScanArgs, SeasonalityScanner,
    auth::{Permission, SessionContext, UserTable, hash_password},
    config::constants,
    data,
};

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("season_scout"), my_code_level)
        .parse_default_env() // RUST_LOG wins when set
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::HashPassword { password } => {
            // No session needed: hashing is how new entries get made
            println!("{}", hash_password(password));
            Ok(())
        }
        Command::Assets => {
            let session = login(&cli)?;
            cmd_assets(&cli, &session)
        }
        Command::Scan(args) => {
            let session = login(&cli)?;
            cmd_scan(&cli, args, &session)
        }
    }
}

/// Builds the user table (builtin + optional users.json next to the binary)
/// and authenticates the CLI credentials into a one-shot session.
fn login(cli: &Cli) -> Result<SessionContext> {
    let user = cli
        .user
        .clone()
        .or_else(|| env::var(constants::ENV_USER).ok());
    let password = cli
        .password
        .clone()
        .or_else(|| env::var(constants::ENV_PASSWORD).ok());

    let (Some(user), Some(password)) = (user, password) else {
        return Err(season_scout::auth::AuthError::MissingCredentials.into());
    };

    let mut table = UserTable::builtin();
    let users_file = Path::new(constants::USERS_FILE);
    if users_file.exists() {
        table.merge_file(users_file)?;
    }

    let session = table.authenticate(&user, &password)?;
    log::info!(
        "session {} opened for {} ({})",
        session.session_id,
        session.username,
        session.role,
    );
    Ok(session)
}

fn cmd_assets(cli: &Cli, session: &SessionContext) -> Result<()> {
    session.require(Permission::ViewResults, "list assets")?;

    let assets = data::available_assets(&cli.data_dir);
    if assets.is_empty() {
        println!(
            "No data files in {}: run make_demo_data or drop CSVs there.",
            cli.data_dir.display(),
        );
        return Ok(());
    }

    for asset in assets {
        println!("{}", asset);
    }
    Ok(())
}

fn cmd_scan(cli: &Cli, args: &ScanArgs, session: &SessionContext) -> Result<()> {
    session.require(Permission::RunScan, "run a scan")?;
    if args.export {
        // Check before the work, not after
        session.require(Permission::ExportResults, "export results")?;
    }

    let scanner = SeasonalityScanner::new(args.to_config())?;

    // Resolved once; every window projection uses the same "today"
    let today = Local::now().date_naive();

    let explicit = !args.assets.is_empty();
    let assets = if explicit {
        args.assets.clone()
    } else {
        data::available_assets(&cli.data_dir)
    };
    if assets.is_empty() {
        println!("Nothing to scan: no data files in {}.", cli.data_dir.display());
        return Ok(());
    }

    let mut series_list: Vec<PriceSeries> = Vec::new();
    for asset in &assets {
        match data::load_series(&cli.data_dir, asset) {
            Ok(series) => {
                if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
                    log::info!("{}: {} bars ({} to {})", asset, series.len(), first, last);
                }
                series_list.push(series);
            }
            // A named asset failing is the caller's problem; a discovered one
            // just gets skipped like the rest of the batch.
            Err(e) if explicit => {
                return Err(e).with_context(|| format!("loading {}", asset));
            }
            Err(e) => log::error!("skipping {}: {:#}", asset, e),
        }
    }

    let results = scanner.scan_assets(&series_list, today);
    if results.is_empty() {
        println!("No seasonal windows passed the filters.");
        return Ok(());
    }

    println!("{}", data::render_table(&results));
    println!(
        "{} window(s) across {} asset(s), horizon {} day(s).",
        results.len(),
        series_list.len(),
        scanner.config().forward_horizon_days,
    );

    if args.export {
        let path = data::export_results(&results, &args.export_dir, "seasonal_phases", Local::now())?;
        println!("Exported to {}", path.display());
    }

    Ok(())
}
