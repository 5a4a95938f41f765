//! Dashboard state and actions.

use std::sync::Arc;

use netsentry_common::{AlertRecord, ApiResult, Backend, ErrorPacketRecord, PacketRecord};
use tokio::sync::mpsc::UnboundedSender;

use super::event::Event;
use crate::config::PollingConfig;
use crate::feeds::{AlertFeed, ErrorPacketFeed, PacketFeed, TrafficMonitor, TrafficPoint};
use crate::interfaces::{load_interfaces, InterfaceMenu};
use crate::router::{Page, PageRouter};
use crate::rules::RuleSubmitter;

/// Everything the dashboard shows, plus the feeds that fill it.
pub struct App {
    backend: Arc<dyn Backend>,
    backend_url: String,
    events: UnboundedSender<Event>,

    pub(crate) router: PageRouter,
    pub(crate) traffic_menu: InterfaceMenu,
    pub(crate) packet_menu: InterfaceMenu,

    traffic: TrafficMonitor,
    alerts: AlertFeed,
    packets: PacketFeed,
    error_packets: ErrorPacketFeed,
    rules: RuleSubmitter,

    pub(crate) rule_input: String,
    rule_output: Option<String>,
    /// Modal message; input is swallowed until it is dismissed.
    notification: Option<String>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(
        backend: Arc<dyn Backend>,
        backend_url: impl Into<String>,
        polling: &PollingConfig,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            traffic: TrafficMonitor::new(Arc::clone(&backend), polling.traffic()),
            alerts: AlertFeed::new(Arc::clone(&backend), polling.alerts()),
            packets: PacketFeed::new(Arc::clone(&backend), polling.packets()),
            error_packets: ErrorPacketFeed::new(Arc::clone(&backend), polling.error_packets()),
            rules: RuleSubmitter::new(Arc::clone(&backend)),
            backend,
            backend_url: backend_url.into(),
            events,
            router: PageRouter::new(),
            traffic_menu: InterfaceMenu::new(),
            packet_menu: InterfaceMenu::new(),
            rule_input: String::new(),
            rule_output: None,
            notification: None,
            status: None,
            should_quit: false,
        }
    }

    /// Kick off the startup fetches: the interface list and whatever alerts
    /// the backend already has.
    pub fn startup(&self) {
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = load_interfaces(backend.as_ref()).await;
            let _ = events.send(Event::InterfacesLoaded(result));
        });

        self.alerts.spawn_refresh();
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Apply a background result. Key events go through `input::handle_key`.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::InterfacesLoaded(result) => self.on_interfaces_loaded(result),
            Event::ScanStarted(result) => self.on_scan_started(result),
            Event::RuleSubmitted(message) => self.rule_output = Some(message),
            Event::Key(key) => super::input::handle_key(self, key),
            Event::Resize => {}
        }
    }

    fn on_interfaces_loaded(&mut self, result: ApiResult<Vec<String>>) {
        match result {
            Ok(names) => {
                self.traffic_menu.populate(&names);
                self.packet_menu.populate(&names);
            }
            Err(e) => {
                tracing::warn!("Failed to load interfaces: {}", e);
                self.status = Some(format!("Failed to load interfaces: {}", e));
            }
        }
    }

    fn on_scan_started(&mut self, result: ApiResult<String>) {
        match result {
            Ok(message) => {
                tracing::info!("Scan started: {}", message);
                self.alerts.begin_polling();
                self.status = Some(if message.is_empty() {
                    "Scan started".to_string()
                } else {
                    message
                });
            }
            Err(e) => {
                tracing::warn!("Failed to start scan: {}", e);
                self.notify(format!("Failed to start scan: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    pub fn start_traffic(&mut self) {
        if let Err(e) = self.traffic.start(self.traffic_menu.selected()) {
            self.notify(e.to_string());
        }
    }

    pub fn start_packets(&mut self) {
        if let Err(e) = self.packets.start(self.packet_menu.selected()) {
            self.notify(e.to_string());
        }
    }

    pub fn start_error_packets(&mut self) {
        self.error_packets.start();
    }

    /// Request a scan; polling begins once the backend agrees.
    pub fn start_scan(&mut self) {
        let backend = self.alerts.backend();
        let events = self.events.clone();
        self.status = Some("Starting scan...".to_string());
        tokio::spawn(async move {
            let result = backend.start_scan().await;
            let _ = events.send(Event::ScanStarted(result));
        });
    }

    /// Submit the current input as a rule.
    pub fn submit_rule(&mut self) {
        let rules = self.rules.clone();
        let rule = self.rule_input.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let message = rules.submit_message(&rule).await;
            let _ = events.send(Event::RuleSubmitted(message));
        });
    }

    /// Start whatever feed belongs to the active page.
    pub fn start_current(&mut self) {
        match self.router.active() {
            Page::Traffic => self.start_traffic(),
            Page::Alerts => self.start_scan(),
            Page::Packets => self.start_packets(),
            Page::ErrorPackets => self.start_error_packets(),
            Page::Rules => self.submit_rule(),
            Page::Introduce => {}
        }
    }

    /// Stop the feed belonging to the active page.
    pub fn stop_current(&mut self) {
        match self.router.active() {
            Page::Traffic => self.traffic.stop(),
            Page::Alerts => self.alerts.stop(),
            Page::Packets => self.packets.stop(),
            Page::ErrorPackets => self.error_packets.stop(),
            Page::Rules | Page::Introduce => {}
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------------
    // Read access for rendering
    // ------------------------------------------------------------------------

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_page(&self) -> Page {
        self.router.active()
    }

    pub fn router_mut(&mut self) -> &mut PageRouter {
        &mut self.router
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn traffic_menu(&self) -> &InterfaceMenu {
        &self.traffic_menu
    }

    pub fn packet_menu(&self) -> &InterfaceMenu {
        &self.packet_menu
    }

    pub fn traffic(&self) -> &TrafficMonitor {
        &self.traffic
    }

    pub fn traffic_series(&self) -> Vec<TrafficPoint> {
        self.traffic.series()
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn alert_snapshot(&self) -> Vec<AlertRecord> {
        self.alerts.alerts()
    }

    pub fn packets(&self) -> &PacketFeed {
        &self.packets
    }

    pub fn packet_snapshot(&self) -> Vec<PacketRecord> {
        self.packets.packets()
    }

    pub fn error_packets(&self) -> &ErrorPacketFeed {
        &self.error_packets
    }

    pub fn error_packet_snapshot(&self) -> Vec<ErrorPacketRecord> {
        self.error_packets.packets()
    }

    pub fn rule_input(&self) -> &str {
        &self.rule_input
    }

    pub fn rule_output(&self) -> Option<&str> {
        self.rule_output.as_deref()
    }
}
