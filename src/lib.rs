//! Nestwatch - nesting site dashboard backend.
//!
//! Reads per-image bird detection files produced by an aerial survey
//! detector, aggregates them into nesting sites, and serves them to the
//! dashboard over HTTP.

#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod detection;
pub mod error;
pub mod query;
pub mod server;
pub mod site;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, FilterArgs};
use config::{
    Config, MalformedFilePolicy, load_config_file, resolve_config_path, save_config,
    validate_config,
};
use dashboard::{DashboardStats, SiteFilter};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the nestwatch CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let config_path = resolve_config_path(cli.global.config.as_deref())?;

    let command = cli.command.unwrap_or(Command::Serve);

    // Config commands must work even when the file holds invalid values.
    if let Command::Config { action } = command {
        return handle_config_command(action, &config_path, &cli.global.overrides());
    }

    let config = load_config_file(&config_path)?.with_overrides(cli.global.overrides());
    validate_config(&config)?;

    match command {
        Command::Serve => {
            let runtime = create_runtime()?;
            runtime.block_on(server::serve(&config))
        }
        Command::Sites { id, filter } => handle_sites_command(&config, id, filter),
        Command::Detections { image_id } => handle_detections_command(&config, image_id),
        Command::Stats { filter, remote } => handle_stats_command(&config, filter, remote),
        Command::Validate => handle_validate_command(&config),
        // Handled above.
        Command::Config { .. } => Ok(()),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Logs go to stderr so JSON output on stdout stays clean.
    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| Error::OutputSerialize { source: e })?;
    println!("{json}");
    Ok(())
}

fn handle_sites_command(config: &Config, id: Option<String>, filter: FilterArgs) -> Result<()> {
    let query = query::site_query(config);

    if let Some(id) = id {
        let site = query.get_site(&id)?.ok_or(Error::SiteNotFound { id })?;
        return print_json(&site);
    }

    let filter = SiteFilter::from(filter);
    let sites = filter.apply(query.list_sites()?);
    info!(
        "{} site(s) after {} filter constraint(s)",
        sites.len(),
        filter.active_count()
    );
    print_json(&sites)
}

fn handle_detections_command(config: &Config, image_id: Option<String>) -> Result<()> {
    let query = query::site_query(config);

    match image_id {
        Some(image_id) => {
            let summary = query
                .get_detection(&image_id)?
                .ok_or(Error::DetectionNotFound { image_id })?;
            print_json(&summary)
        }
        None => print_json(&query.list_detections()?),
    }
}

fn handle_stats_command(config: &Config, filter: FilterArgs, remote: Option<String>) -> Result<()> {
    let sites = match remote {
        Some(base_url) => {
            info!("Fetching sites from {base_url}");
            let runtime = create_runtime()?;
            runtime.block_on(client::fetch_sites(&base_url))
        }
        None => query::site_query(config).list_sites()?,
    };

    let filtered = SiteFilter::from(filter).apply(sites);
    print_json(&DashboardStats::compute(&filtered))
}

/// Check every detection file; always reads in skip mode so all problems are listed.
#[allow(clippy::print_stdout)]
fn handle_validate_command(config: &Config) -> Result<()> {
    let dir = &config.data.detections_dir;
    let scan = detection::read_detection_dir(dir, MalformedFilePolicy::Skip)?;

    let mut problems = 0;

    for skipped in &scan.skipped {
        println!("INVALID  {}: {}", skipped.path.display(), skipped.reason);
        problems += 1;
    }

    let mut seen = std::collections::HashSet::new();
    for file in &scan.files {
        if let Err(e) = file.center.to_coordinate() {
            println!("INVALID  {}: {e}", file.source_path.display());
            problems += 1;
        }
        if !seen.insert(file.image_id.as_str()) {
            // Only the first file with a given id is reachable by lookup.
            println!(
                "WARNING  {}: duplicate image_id '{}'",
                file.source_path.display(),
                file.image_id
            );
        }
    }

    let with_detections = scan
        .files
        .iter()
        .filter(|file| !file.detections.is_empty())
        .count();
    println!(
        "{} file(s) read, {} with detections, {} problem(s)",
        scan.files.len() + scan.skipped.len(),
        with_detections,
        problems
    );

    if problems > 0 {
        return Err(Error::ValidationFailed { count: problems });
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(
    action: ConfigAction,
    path: &Path,
    overrides: &config::ConfigOverrides,
) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(path)?.with_overrides(overrides.clone());
            if let Err(e) = validate_config(&config) {
                warn!("{e}");
            }
            let contents =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
