//! CLI argument definitions.

use super::validators::parse_base_url;
use crate::config::{ConfigOverrides, MalformedFilePolicy};
use crate::dashboard::SiteFilter;
use crate::site::{Priority, VerificationStatus};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Nesting site dashboard backend for aerial bird detections.
#[derive(Debug, Parser)]
#[command(name = "nestwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: serve).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve,
    /// Print nesting sites as JSON.
    Sites {
        /// Print only the site with this identifier.
        id: Option<String>,
        /// Site filters (ignored when an ID is given).
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print detection file summaries as JSON.
    Detections {
        /// Print only the file with this image identifier.
        image_id: Option<String>,
    },
    /// Print dashboard statistics as JSON.
    Stats {
        /// Site filters applied before computing statistics.
        #[command(flatten)]
        filter: FilterArgs,
        /// Fetch sites from a running server instead of reading files.
        #[arg(long, value_parser = parse_base_url, env = "NESTWATCH_REMOTE")]
        remote: Option<String>,
    },
    /// Check every detection file and report problems.
    Validate,
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Options accepted before or after any subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "NESTWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of detection JSON files.
    #[arg(short, long, global = true, env = "NESTWATCH_DETECTIONS_DIR")]
    pub detections_dir: Option<PathBuf>,

    /// Directory of annotated debug images.
    #[arg(long, global = true, env = "NESTWATCH_DEBUG_IMAGES_DIR")]
    pub debug_images_dir: Option<PathBuf>,

    /// What to do with detection files that cannot be parsed.
    #[arg(long, global = true, value_enum, env = "NESTWATCH_ON_MALFORMED")]
    pub on_malformed: Option<MalformedFilePolicy>,

    /// Address for the HTTP server (host:port).
    #[arg(short, long, global = true, env = "NESTWATCH_BIND")]
    pub bind: Option<String>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Values that take precedence over the configuration file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            detections_dir: self.detections_dir.clone(),
            debug_images_dir: self.debug_images_dir.clone(),
            on_malformed: self.on_malformed,
            bind: self.bind.clone(),
        }
    }
}

/// Dashboard filter flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Species labels to keep (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub species: Vec<String>,

    /// Habitats to keep (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub habitat: Vec<String>,

    /// Priorities to keep (comma-separated: high,medium,low).
    #[arg(long, value_delimiter = ',')]
    pub priority: Vec<Priority>,

    /// Verification statuses to keep (comma-separated: verified,needs-review,unverified).
    #[arg(long, value_delimiter = ',')]
    pub verification_status: Vec<VerificationStatus>,

    /// Minimum number of detections per site.
    #[arg(long, default_value_t = 0)]
    pub min_abundance: usize,
}

impl From<FilterArgs> for SiteFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            species: args.species,
            habitat: args.habitat,
            priority: args.priority,
            verification_status: args.verification_status,
            min_abundance: args.min_abundance,
        }
    }
}
