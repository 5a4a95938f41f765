//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "netsentry")]
#[command(about = "Terminal dashboard for a network monitoring backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (default: from .netsentry.toml or http://127.0.0.1:5000)
    #[arg(long, env = "NETSENTRY_URL", global = true)]
    pub backend_url: Option<String>,

    /// Config file to use instead of searching for .netsentry.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive dashboard (default)
    Dash {
        /// Page to open on (introduce, traffic, alerts, packets, error-packets, rules)
        #[arg(long, default_value = "introduce")]
        page: String,
    },
    /// List the backend's network interfaces
    Interfaces {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print the current intrusion alerts
    Alerts {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Submit a detection rule
    AddRule {
        /// Rule text, passed to the backend unchanged
        rule: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Dash {
            page: "introduce".to_string(),
        }
    }
}
