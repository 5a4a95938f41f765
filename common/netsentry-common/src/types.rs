//! Wire types for the monitoring backend
//!
//! Request bodies and response envelopes for every endpoint the dashboard
//! consumes. Envelopes carrying a `status` field are converted into
//! [`ApiResult`]s with `into_result`, so a non-success answer never reaches
//! the feeds as data.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};

/// Message used when the backend fails without saying why
const UNKNOWN_ERROR: &str = "unknown error";

// ============================================================================
// Status
// ============================================================================

/// Outcome reported in the `status` field of an envelope
///
/// Anything other than `"success"` counts as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    #[serde(other)]
    Failure,
}

fn rejected(message: Option<String>) -> ApiError {
    ApiError::Rejected(message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
}

// ============================================================================
// Records
// ============================================================================

/// Send/receive rates for one interface, in Mbps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficRate {
    pub rate_sent: f64,
    pub rate_recv: f64,
}

impl TrafficRate {
    /// Combined rate plotted on the traffic chart
    pub fn total(&self) -> f64 {
        self.rate_sent + self.rate_recv
    }
}

/// One intrusion-detection alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub destination_ip: String,
}

/// One captured packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRecord {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub length: String,
    #[serde(default)]
    pub info: String,
}

/// One malformed packet, stamped with the time the backend saw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPacketRecord {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub length: String,
    #[serde(default)]
    pub info: String,
}

/// Capture tools report lengths as text, other backends as numbers
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}

// ============================================================================
// Requests
// ============================================================================

/// Body of the traffic sample request
#[derive(Debug, Serialize)]
pub struct TrafficRequest<'a> {
    pub interface: &'a str,
}

/// Body of the add-rule request
#[derive(Debug, Serialize)]
pub struct RuleRequest<'a> {
    pub rule: &'a str,
}

// ============================================================================
// Responses
// ============================================================================

/// `{interfaces: [string]}`
#[derive(Debug, Deserialize)]
pub struct InterfacesResponse {
    pub interfaces: Vec<String>,
}

/// `{status, traffic_data}` or `{status, message}`
#[derive(Debug, Deserialize)]
pub struct TrafficResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub traffic_data: Option<TrafficRate>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TrafficResponse {
    pub fn into_result(self) -> ApiResult<TrafficRate> {
        match self.status {
            ResponseStatus::Success => self
                .traffic_data
                .ok_or(ApiError::MissingField("traffic_data")),
            ResponseStatus::Failure => Err(rejected(self.message)),
        }
    }
}

/// `{status, message}` returned by actions (scan start, add rule)
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    /// The backend's message on success, which may be empty
    pub fn into_result(self) -> ApiResult<String> {
        match self.status {
            ResponseStatus::Success => Ok(self.message.unwrap_or_default()),
            ResponseStatus::Failure => Err(rejected(self.message)),
        }
    }
}

/// `{results: [...]}`, the current alert snapshot
///
/// This endpoint carries no status on success. A failure body
/// (`{status, message}`) has no `results` and is reported as rejected.
#[derive(Debug, Deserialize)]
pub struct ScanResultsResponse {
    #[serde(default)]
    pub results: Option<Vec<AlertRecord>>,
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ScanResultsResponse {
    pub fn into_result(self) -> ApiResult<Vec<AlertRecord>> {
        match (self.results, self.status) {
            (Some(results), _) => Ok(results),
            (None, Some(ResponseStatus::Failure)) => Err(rejected(self.message)),
            (None, _) => Err(ApiError::MissingField("results")),
        }
    }
}

/// `{status, data: [...]}` or `{status, message}` for the packet streams
#[derive(Debug, Deserialize)]
pub struct StreamResponse<T> {
    pub status: ResponseStatus,
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> StreamResponse<T> {
    pub fn into_result(self) -> ApiResult<Vec<T>> {
        match self.status {
            ResponseStatus::Success => self.data.ok_or(ApiError::MissingField("data")),
            ResponseStatus::Failure => Err(rejected(self.message)),
        }
    }
}
