//! One-shot commands
//!
//! Each talks to the backend once and prints to stdout, for scripting or a
//! quick check without starting the dashboard.

use anyhow::Result;
use netsentry_common::Backend;

use crate::interfaces::load_interfaces;
use crate::rules::{outcome_message, RuleSubmitter};
use crate::view::{alert_rows, text_table, ALERT_HEADERS};

/// Print one interface name per line, or a JSON array
pub async fn run_interfaces(backend: &dyn Backend, json: bool) -> Result<()> {
    let names = load_interfaces(backend).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("No interfaces reported by the backend.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Print the backend's current alert snapshot as a table or JSON
pub async fn run_alerts(backend: &dyn Backend, json: bool) -> Result<()> {
    let alerts = backend.scan_results().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!("No alerts.");
        return Ok(());
    }

    print!("{}", text_table(&ALERT_HEADERS, &alert_rows(&alerts)));
    Ok(())
}

/// Submit a rule and print the outcome; errors when the backend refuses it
pub async fn run_add_rule(submitter: &RuleSubmitter, rule: &str) -> Result<()> {
    let result = submitter.submit(rule).await;
    let message = outcome_message(&result);

    match result {
        Ok(_) => {
            println!("{}", message);
            Ok(())
        }
        Err(_) => anyhow::bail!(message),
    }
}
