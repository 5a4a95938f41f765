//! Feed controllers

use std::sync::Arc;
use std::time::Duration;

use netsentry::error::DashboardError;
use netsentry::feeds::{AlertFeed, ErrorPacketFeed, PacketFeed, TrafficMonitor};
use netsentry::rules::{RuleSubmitter, RULE_ADDED};
use tokio::time::sleep;

use crate::mock::{alert, error_packet, packet, rate, MockBackend};

const SECOND: Duration = Duration::from_secs(1);

fn infos(packets: &[netsentry_common::PacketRecord]) -> Vec<&str> {
    packets.iter().map(|p| p.info.as_str()).collect()
}

// ============================================================================
// Traffic
// ============================================================================

#[tokio::test(start_paused = true)]
async fn traffic_restart_keeps_a_single_timer() {
    let backend = Arc::new(MockBackend::default());
    let mut monitor = TrafficMonitor::new(backend.clone(), SECOND);

    monitor.start(Some("eth0")).unwrap();
    monitor.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(3500)).await;

    assert_eq!(backend.traffic.calls(), 3);
    assert_eq!(monitor.series().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn traffic_first_sample_after_one_period() {
    let backend = Arc::new(MockBackend::default());
    let mut monitor = TrafficMonitor::new(backend.clone(), Duration::from_secs(5));

    monitor.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(4900)).await;
    assert_eq!(backend.traffic.calls(), 0);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.traffic.calls(), 1);
    assert_eq!(backend.traffic.args(), vec!["eth0"]);
}

#[tokio::test(start_paused = true)]
async fn traffic_series_keeps_last_ten_samples() {
    let backend = Arc::new(MockBackend::default());
    backend.traffic.always(Ok(rate(1.0, 2.0)));
    let mut monitor = TrafficMonitor::new(backend.clone(), SECOND);

    monitor.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(12_500)).await;

    let series = monitor.series();
    assert_eq!(backend.traffic.calls(), 12);
    assert_eq!(series.len(), 10);
    assert!(series.iter().all(|p| p.mbps == 3.0));
}

#[tokio::test(start_paused = true)]
async fn traffic_failure_leaves_series_untouched() {
    let backend = Arc::new(MockBackend::default());
    backend
        .traffic
        .then(Ok(rate(0.5, 0.5)))
        .then(Err("capture not running".into()));
    backend.traffic.always(Ok(rate(1.0, 1.0)));
    let mut monitor = TrafficMonitor::new(backend.clone(), SECOND);

    monitor.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(monitor.series().len(), 1);
    assert!(monitor.is_polling());

    sleep(SECOND).await;
    let totals: Vec<f64> = monitor.series().iter().map(|p| p.mbps).collect();
    assert_eq!(totals, vec![1.0, 2.0]);
}

#[tokio::test(start_paused = true)]
async fn traffic_start_without_interface_is_refused() {
    let backend = Arc::new(MockBackend::default());
    let mut monitor = TrafficMonitor::new(backend.clone(), SECOND);

    assert_eq!(monitor.start(None), Err(DashboardError::NoInterfaceSelected));
    assert_eq!(monitor.start(Some("")), Err(DashboardError::NoInterfaceSelected));
    sleep(Duration::from_secs(3)).await;
    assert_eq!(backend.traffic.calls(), 0);
    assert!(!monitor.is_polling());

    // A running poll survives a refused restart
    monitor.start(Some("wlan0")).unwrap();
    assert!(monitor.start(None).is_err());
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(monitor.interface(), Some("wlan0"));
    assert_eq!(backend.traffic.args(), vec!["wlan0"]);
}

#[tokio::test(start_paused = true)]
async fn traffic_stop_ends_polling() {
    let backend = Arc::new(MockBackend::default());
    let mut monitor = TrafficMonitor::new(backend.clone(), SECOND);

    monitor.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(1500)).await;
    monitor.stop();
    sleep(Duration::from_secs(5)).await;

    assert_eq!(backend.traffic.calls(), 1);
    assert!(!monitor.is_polling());
    assert_eq!(monitor.series().len(), 1);
}

// ============================================================================
// Packets
// ============================================================================

#[tokio::test(start_paused = true)]
async fn packets_newest_record_first() {
    let backend = Arc::new(MockBackend::default());
    backend
        .packets
        .then(Ok(vec![packet("A"), packet("B"), packet("C")]));
    let mut feed = PacketFeed::new(backend.clone(), SECOND);

    feed.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(1500)).await;

    assert_eq!(infos(&feed.packets()), vec!["C", "B", "A"]);
}

#[tokio::test(start_paused = true)]
async fn packets_buffer_bounded_and_kept_across_restart() {
    let backend = Arc::new(MockBackend::default());
    let batch: Vec<_> = (0..10).map(|i| packet(&format!("p{}", i))).collect();
    backend.packets.always(Ok(batch));
    let mut feed = PacketFeed::new(backend.clone(), SECOND);

    feed.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(feed.packets().len(), 15);
    assert_eq!(feed.packets()[0].info, "p9");

    backend.packets.always(Ok(vec![packet("wlan")]));
    feed.start(Some("wlan0")).unwrap();
    assert_eq!(feed.packets().len(), 15);

    sleep(Duration::from_millis(1500)).await;
    let packets = feed.packets();
    assert_eq!(packets.len(), 15);
    assert_eq!(packets[0].info, "wlan");
    assert_eq!(backend.packets.args(), vec!["eth0", "eth0", "wlan0"]);
}

#[tokio::test(start_paused = true)]
async fn packets_rejection_leaves_buffer_untouched() {
    let backend = Arc::new(MockBackend::default());
    backend
        .packets
        .then(Ok(vec![packet("A")]))
        .then(Err("Interface not found".into()));
    let mut feed = PacketFeed::new(backend.clone(), SECOND);

    feed.start(Some("eth0")).unwrap();
    sleep(Duration::from_millis(2500)).await;

    assert_eq!(backend.packets.calls(), 2);
    assert_eq!(infos(&feed.packets()), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn packets_start_without_interface_is_refused() {
    let backend = Arc::new(MockBackend::default());
    let mut feed = PacketFeed::new(backend.clone(), SECOND);

    assert_eq!(feed.start(None), Err(DashboardError::NoInterfaceSelected));
    sleep(Duration::from_secs(2)).await;
    assert_eq!(backend.packets.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn error_packets_polled_without_interface() {
    let backend = Arc::new(MockBackend::default());
    backend
        .error_packets
        .then(Ok(vec![error_packet("Malformed Packet"), error_packet("Bad checksum")]))
        .then(Err("capture failed".into()));
    let mut feed = ErrorPacketFeed::new(backend.clone(), SECOND);

    feed.start();
    feed.start();
    sleep(Duration::from_millis(2500)).await;

    let seen: Vec<String> = feed.packets().into_iter().map(|p| p.info).collect();
    assert_eq!(backend.error_packets.calls(), 2);
    assert_eq!(seen, vec!["Bad checksum", "Malformed Packet"]);
}

// ============================================================================
// Alerts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn alerts_poll_immediately_then_every_period() {
    let backend = Arc::new(MockBackend::default());
    backend
        .scan_results
        .then(Ok(vec![alert("ICMP ping")]))
        .then(Ok(vec![alert("ICMP ping"), alert("SSH brute force")]));
    backend.scan_results.always(Err("scanner stopped".into()));
    let mut feed = AlertFeed::new(backend.clone(), Duration::from_secs(5));

    feed.begin_polling();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.scan_results.calls(), 1);
    assert_eq!(feed.alerts().len(), 1);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.scan_results.calls(), 2);
    let msgs: Vec<String> = feed.alerts().into_iter().map(|a| a.msg).collect();
    assert_eq!(msgs, vec!["ICMP ping", "SSH brute force"]);

    // A failed refresh keeps the previous snapshot
    sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.scan_results.calls(), 3);
    assert_eq!(feed.alerts().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn alerts_restart_keeps_a_single_timer() {
    let backend = Arc::new(MockBackend::default());
    let mut feed = AlertFeed::new(backend.clone(), Duration::from_secs(5));

    feed.begin_polling();
    sleep(Duration::from_secs(2)).await;
    assert_eq!(backend.scan_results.calls(), 1);

    // Restart at t=2: immediate fetch, then t=7. The first timer's t=5 tick is gone.
    feed.begin_polling();
    sleep(Duration::from_millis(5500)).await;

    assert_eq!(backend.scan_results.calls(), 3);
    assert!(feed.is_polling());

    feed.stop();
    sleep(Duration::from_secs(20)).await;
    assert_eq!(backend.scan_results.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn alert_refresh_once_does_not_poll() {
    let backend = Arc::new(MockBackend::default());
    backend.scan_results.always(Ok(vec![alert("old alert")]));
    let feed = AlertFeed::new(backend.clone(), Duration::from_secs(5));

    feed.refresh_once().await;
    sleep(Duration::from_secs(12)).await;

    assert_eq!(backend.scan_results.calls(), 1);
    assert_eq!(feed.alerts().len(), 1);
    assert!(!feed.is_polling());
}

// ============================================================================
// Rules
// ============================================================================

#[tokio::test]
async fn rule_submitted_verbatim() {
    let backend = Arc::new(MockBackend::default());
    let submitter = RuleSubmitter::new(backend.clone());
    let rule = "alert tcp any any -> any 22 (msg:\"SSH\"; sid:1000002;)";

    assert_eq!(submitter.submit_message(rule).await, RULE_ADDED);
    assert_eq!(backend.add_rule.args(), vec![rule]);
}

#[tokio::test]
async fn rule_rejection_shows_reason() {
    let backend = Arc::new(MockBackend::default());
    backend.add_rule.always(Err("Invalid rule syntax".into()));
    let submitter = RuleSubmitter::new(backend.clone());

    assert_eq!(
        submitter.submit_message("garbage").await,
        "Failed to add rule: Invalid rule syntax"
    );
}
