//! Detection rule submission
//!
//! The backend is the only judge of rule syntax; nothing is validated,
//! retried or remembered here.

use std::sync::Arc;

use netsentry_common::{ApiResult, Backend};

/// Output shown after the backend accepts a rule
pub const RULE_ADDED: &str = "Rule added successfully.";

/// Text for the output field given the submission result
pub fn outcome_message(result: &ApiResult<String>) -> String {
    match result {
        Ok(_) => RULE_ADDED.to_string(),
        Err(e) => format!("Failed to add rule: {}", e),
    }
}

#[derive(Clone)]
pub struct RuleSubmitter {
    backend: Arc<dyn Backend>,
}

impl RuleSubmitter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Submit `rule` as-is
    pub async fn submit(&self, rule: &str) -> ApiResult<String> {
        let result = self.backend.add_rule(rule).await;
        match &result {
            Ok(_) => tracing::info!("Rule accepted"),
            Err(e) => tracing::warn!("Rule rejected: {}", e),
        }
        result
    }

    /// Submit `rule` and format the outcome for display
    pub async fn submit_message(&self, rule: &str) -> String {
        outcome_message(&self.submit(rule).await)
    }
}
