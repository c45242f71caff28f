//! Command-line arguments for showbill-web
//!
//! Every flag can also come from a `SHOWBILL_*` environment variable; both
//! outrank the TOML config file.

use std::path::PathBuf;

use clap::Parser;
use showbill_common::config::ConfigOverrides;
use showbill_common::CountPolicy;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "showbill-web")]
#[command(about = "Venue, artist and show listings over HTTP")]
#[command(version)]
pub struct Args {
    /// SQLite database file (created on first run)
    #[arg(long, env = "SHOWBILL_DATABASE")]
    pub database: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(long, env = "SHOWBILL_BIND")]
    pub bind: Option<String>,

    /// Default tracing level when RUST_LOG is unset
    #[arg(long, env = "SHOWBILL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Which shows the venue listing counts: "upcoming" or "all_shows"
    #[arg(long, env = "SHOWBILL_COUNT_POLICY")]
    pub count_policy: Option<CountPolicy>,

    /// Explicit config.toml path
    #[arg(long = "config", env = "SHOWBILL_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Insert the demo venues, artists and shows into an empty database
    #[arg(long)]
    pub seed_demo: bool,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database: self.database.clone(),
            bind: self.bind.clone(),
            log_level: self.log_level.clone(),
            count_policy: self.count_policy,
            config_file: self.config_file.clone(),
        }
    }
}
