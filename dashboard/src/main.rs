use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;

use netsentry::cli::{commands, Cli, Commands};
use netsentry::config::DashboardConfig;
use netsentry::rules::RuleSubmitter;
use netsentry::tui::{self, App, EventHandler};
use netsentry_common::{init_tracing, Backend, HttpBackend};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DashboardConfig::load()?,
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(
        &config.backend.url,
        config.endpoints.clone(),
        config.backend.timeout(),
    )?);

    match cli.command.unwrap_or_default() {
        Commands::Dash { page } => {
            // The dashboard owns the terminal, so logs go to a file
            let log_path = config.logging.file_path();
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
            init_tracing("netsentry", cli.verbose, Mutex::new(log_file))?;

            tracing::info!("Starting dashboard against {}", config.backend.url);

            let events = EventHandler::new();
            let mut app = App::new(
                backend,
                config.backend.url.clone(),
                &config.polling,
                events.sender(),
            );
            app.router_mut().show_page(&page)?;

            tui::run(app, events).await?;
        }
        Commands::Interfaces { json } => {
            init_tracing("netsentry", cli.verbose, std::io::stderr)?;
            commands::run_interfaces(backend.as_ref(), json).await?;
        }
        Commands::Alerts { json } => {
            init_tracing("netsentry", cli.verbose, std::io::stderr)?;
            commands::run_alerts(backend.as_ref(), json).await?;
        }
        Commands::AddRule { rule } => {
            init_tracing("netsentry", cli.verbose, std::io::stderr)?;
            commands::run_add_rule(&RuleSubmitter::new(backend), &rule).await?;
        }
    }

    Ok(())
}
