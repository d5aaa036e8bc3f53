use crate::config::{CREDENTIAL_SOURCE_ENV, SETTINGS_ENV};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bosh-bootstrap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap a Micro BOSH onto AWS or OpenStack")]
#[command(long_about = "An interactive wizard that picks infrastructure credentials from your fog file, chooses a region, a deployment login and the latest stable stemcell, then deploys Micro BOSH. Answers are saved so re-running only asks what is still missing.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the settings file
    #[arg(short, long, global = true, value_name = "FILE", env = SETTINGS_ENV)]
    pub settings: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure, then prepare this machine and deploy Micro BOSH from it
    Local {
        /// Credential source (fog) file
        #[arg(long, value_name = "PATH", env = CREDENTIAL_SOURCE_ENV)]
        fog: Option<PathBuf>,

        /// Upgrade the BOSH CLI before deploying
        #[arg(long)]
        upgrade_deps: bool,

        /// Print the provisioning commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Configure only; provisioning runs from the saved settings elsewhere
    Remote {
        /// Credential source (fog) file
        #[arg(long, value_name = "PATH", env = CREDENTIAL_SOURCE_ENV)]
        fog: Option<PathBuf>,

        /// Upgrade the BOSH CLI before deploying
        #[arg(long)]
        upgrade_deps: bool,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
