//! Backend client
//!
//! [`Backend`] is the seam every feed fetches through. [`HttpBackend`] is
//! the production implementation; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::ApiResult;
use crate::types::{
    AlertRecord, ErrorPacketRecord, InterfacesResponse, PacketRecord, RuleRequest,
    ScanResultsResponse, StatusResponse, StreamResponse, TrafficRate, TrafficRequest,
    TrafficResponse,
};

/// Every endpoint the dashboard consumes
#[async_trait]
pub trait Backend: Send + Sync {
    /// Names of the network interfaces, in server order
    async fn interfaces(&self) -> ApiResult<Vec<String>>;

    /// Current send/receive rate for one interface
    async fn traffic(&self, interface: &str) -> ApiResult<TrafficRate>;

    /// Ask the backend to begin intrusion scanning
    async fn start_scan(&self) -> ApiResult<String>;

    /// The backend's current alert set
    async fn scan_results(&self) -> ApiResult<Vec<AlertRecord>>;

    /// Packets captured on one interface since the last call
    async fn packets(&self, interface: &str) -> ApiResult<Vec<PacketRecord>>;

    /// Malformed packets seen on any interface since the last call
    async fn error_packets(&self) -> ApiResult<Vec<ErrorPacketRecord>>;

    /// Submit a detection rule
    async fn add_rule(&self, rule: &str) -> ApiResult<String>;
}

// ============================================================================
// Endpoint paths
// ============================================================================

/// Endpoint paths, joined onto the backend base URL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_interfaces")]
    pub interfaces: String,
    #[serde(default = "default_traffic")]
    pub traffic: String,
    #[serde(default = "default_start_scan")]
    pub start_scan: String,
    #[serde(default = "default_scan_results")]
    pub scan_results: String,
    #[serde(default = "default_packets")]
    pub packets: String,
    #[serde(default = "default_error_packets")]
    pub error_packets: String,
    #[serde(default = "default_add_rule")]
    pub add_rule: String,
}

fn default_interfaces() -> String {
    "/get_interfaces".to_string()
}

fn default_traffic() -> String {
    "/get_network_traffic".to_string()
}

fn default_start_scan() -> String {
    "/start_scan".to_string()
}

fn default_scan_results() -> String {
    "/get_scan_results".to_string()
}

fn default_packets() -> String {
    "/get_wireshark_data".to_string()
}

fn default_error_packets() -> String {
    "/get_error_packets".to_string()
}

fn default_add_rule() -> String {
    "/add_rule".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            interfaces: default_interfaces(),
            traffic: default_traffic(),
            start_scan: default_start_scan(),
            scan_results: default_scan_results(),
            packets: default_packets(),
            error_packets: default_error_packets(),
            add_rule: default_add_rule(),
        }
    }
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// JSON-over-HTTP backend
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    endpoints: Endpoints,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, endpoints: Endpoints, timeout: Duration) -> ApiResult<Self> {
        let mut base = Url::parse(base_url)?;
        // Endpoint paths resolve under the base path, not the host root
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            endpoints,
        })
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        tracing::trace!("GET {}", url);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&(impl serde::Serialize + Sync)>,
    ) -> ApiResult<T> {
        let url = self.url(path)?;
        tracing::trace!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode(response).await
    }
}

/// Decode a JSON body regardless of the HTTP status code
///
/// The backend reports failures as `{status: "error"}` bodies on 4xx/5xx
/// responses, so the body is the authority, not the status line.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Undecodable {} response ({} bytes): {}", status, body.len(), e);
        e.into()
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn interfaces(&self) -> ApiResult<Vec<String>> {
        let response: InterfacesResponse = self.get(&self.endpoints.interfaces).await?;
        Ok(response.interfaces)
    }

    async fn traffic(&self, interface: &str) -> ApiResult<TrafficRate> {
        let body = TrafficRequest { interface };
        let response: TrafficResponse = self.post(&self.endpoints.traffic, Some(&body)).await?;
        response.into_result()
    }

    async fn start_scan(&self) -> ApiResult<String> {
        let response: StatusResponse = self
            .post(&self.endpoints.start_scan, None::<&serde_json::Value>)
            .await?;
        response.into_result()
    }

    async fn scan_results(&self) -> ApiResult<Vec<AlertRecord>> {
        let response: ScanResultsResponse = self.get(&self.endpoints.scan_results).await?;
        response.into_result()
    }

    async fn packets(&self, interface: &str) -> ApiResult<Vec<PacketRecord>> {
        let url = self.url(&self.endpoints.packets)?;
        tracing::trace!("GET {} (interface={})", url, interface);
        let response = self
            .client
            .get(url)
            .query(&[("interface", interface)])
            .send()
            .await?;
        let response: StreamResponse<PacketRecord> = decode(response).await?;
        response.into_result()
    }

    async fn error_packets(&self) -> ApiResult<Vec<ErrorPacketRecord>> {
        let response: StreamResponse<ErrorPacketRecord> =
            self.get(&self.endpoints.error_packets).await?;
        response.into_result()
    }

    async fn add_rule(&self, rule: &str) -> ApiResult<String> {
        let body = RuleRequest { rule };
        let response: StatusResponse = self.post(&self.endpoints.add_rule, Some(&body)).await?;
        response.into_result()
    }
}
