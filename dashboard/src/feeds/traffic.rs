//! Traffic monitor
//!
//! Polls the send/receive rate of one interface and keeps the last
//! [`TRAFFIC_WINDOW`] combined samples for the bar chart.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use netsentry_common::{ApiResult, Backend, TrafficRate};

use super::lock;
use crate::buffer::{RollingSeries, TRAFFIC_WINDOW};
use crate::error::DashboardError;
use crate::poller::{PollSchedule, Poller};

/// Wall-clock format of chart labels
pub const LABEL_FORMAT: &str = "%H:%M:%S";

/// One bar on the traffic chart
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficPoint {
    pub label: String,
    /// Sent plus received, in Mbps
    pub mbps: f64,
}

/// Apply one tick's response to the series
///
/// On failure the series is left untouched and the error handed back.
pub fn apply_sample(
    series: &mut RollingSeries<TrafficPoint>,
    result: ApiResult<TrafficRate>,
    label: String,
) -> ApiResult<f64> {
    let rate = result?;
    let mbps = rate.total();
    series.push(TrafficPoint { label, mbps });
    Ok(mbps)
}

async fn tick(backend: &dyn Backend, series: &Mutex<RollingSeries<TrafficPoint>>, interface: &str) {
    let result = backend.traffic(interface).await;
    let label = Local::now().format(LABEL_FORMAT).to_string();

    match apply_sample(&mut lock(series), result, label) {
        Ok(mbps) => tracing::debug!("traffic {}: {:.3} Mbps", interface, mbps),
        Err(e) => tracing::warn!("Failed to retrieve network traffic for {}: {}", interface, e),
    }
}

/// Rolling traffic chart for one interface
pub struct TrafficMonitor {
    backend: Arc<dyn Backend>,
    series: Arc<Mutex<RollingSeries<TrafficPoint>>>,
    poller: Poller,
    period: Duration,
    interface: Option<String>,
}

impl TrafficMonitor {
    pub fn new(backend: Arc<dyn Backend>, period: Duration) -> Self {
        Self {
            backend,
            series: Arc::new(Mutex::new(RollingSeries::new(TRAFFIC_WINDOW))),
            poller: Poller::new("traffic"),
            period,
            interface: None,
        }
    }

    /// Start polling `interface`, replacing any poll already running
    ///
    /// Fails without touching the running poll when no interface is selected.
    pub fn start(&mut self, interface: Option<&str>) -> Result<(), DashboardError> {
        let interface = interface
            .filter(|name| !name.is_empty())
            .ok_or(DashboardError::NoInterfaceSelected)?
            .to_string();

        let backend = Arc::clone(&self.backend);
        let series = Arc::clone(&self.series);
        let target = interface.clone();
        self.poller.start(self.period, PollSchedule::Delayed, move || {
            let backend = Arc::clone(&backend);
            let series = Arc::clone(&series);
            let interface = target.clone();
            async move { tick(backend.as_ref(), &series, &interface).await }
        });

        tracing::info!("Monitoring traffic on {}", interface);
        self.interface = Some(interface);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.poller.stop() {
            tracing::info!("Stopped traffic monitoring");
        }
        self.interface = None;
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Interface being polled, if any
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// Current series, oldest first
    pub fn series(&self) -> Vec<TrafficPoint> {
        lock(&self.series).to_vec()
    }
}
