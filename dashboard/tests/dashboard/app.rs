//! Dashboard state driven the way the UI loop drives it

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use netsentry::config::PollingConfig;
use netsentry::router::Page;
use netsentry::rules::RULE_ADDED;
use netsentry::tui::{render, App, Event, EventHandler};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::time::sleep;

use crate::mock::{alert, MockBackend};

fn dashboard(backend: &Arc<MockBackend>) -> (App, EventHandler) {
    let events = EventHandler::detached();
    let app = App::new(
        backend.clone(),
        "http://127.0.0.1:5000",
        &PollingConfig::default(),
        events.sender(),
    );
    (app, events)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

/// Wait for the next background result and apply it
async fn settle(app: &mut App, events: &mut EventHandler) {
    let event = events.next().await.expect("event channel closed");
    app.handle_event(event);
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| render::render(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn startup_fills_both_interface_menus() {
    let backend = Arc::new(MockBackend::default());
    backend.scan_results.always(Ok(vec![alert("ICMP ping")]));
    let (mut app, mut events) = dashboard(&backend);

    app.startup();
    settle(&mut app, &mut events).await;
    sleep(Duration::from_millis(10)).await;

    for menu in [app.traffic_menu(), app.packet_menu()] {
        assert_eq!(menu.options(), ["eth0", "wlan0"]);
        assert_eq!(menu.selected(), Some("eth0"));
    }
    assert_eq!(backend.interfaces.calls(), 1);

    // Existing results are shown without starting a scan
    assert_eq!(app.alert_snapshot().len(), 1);
    assert!(!app.alerts().is_polling());
    assert_eq!(backend.start_scan.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn startup_interface_failure_leaves_menus_empty() {
    let backend = Arc::new(MockBackend::default());
    backend.interfaces.always(Err("tshark not found".into()));
    let (mut app, mut events) = dashboard(&backend);

    app.startup();
    settle(&mut app, &mut events).await;

    assert!(app.traffic_menu().options().is_empty());
    assert!(app.packet_menu().options().is_empty());
    assert_eq!(
        app.status(),
        Some("Failed to load interfaces: tshark not found")
    );
}

#[tokio::test(start_paused = true)]
async fn traffic_follows_menu_selection() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, mut events) = dashboard(&backend);
    app.startup();
    settle(&mut app, &mut events).await;

    app.router_mut().show(Page::Traffic);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    sleep(Duration::from_millis(5500)).await;

    assert!(app.traffic().is_polling());
    assert_eq!(backend.traffic.args(), vec!["wlan0"]);
    assert_eq!(app.traffic_series().len(), 1);

    press(&mut app, KeyCode::Char('x'));
    assert!(!app.traffic().is_polling());
}

#[tokio::test(start_paused = true)]
async fn scan_started_from_alerts_page() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, mut events) = dashboard(&backend);

    app.router_mut().show(Page::Alerts);
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;
    sleep(Duration::from_millis(10)).await;

    assert!(app.alerts().is_polling());
    assert_eq!(app.status(), Some("Scan started"));
    assert_eq!(backend.scan_results.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn second_scan_replaces_alert_poll() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, mut events) = dashboard(&backend);

    app.router_mut().show(Page::Alerts);
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;
    sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.scan_results.calls(), 1);

    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;
    sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.start_scan.calls(), 2);
    assert_eq!(backend.scan_results.calls(), 2);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.scan_results.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn scan_refusal_is_reported() {
    let backend = Arc::new(MockBackend::default());
    backend.start_scan.always(Err("Scan already running".into()));
    let (mut app, mut events) = dashboard(&backend);

    app.router_mut().show(Page::Alerts);
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;
    sleep(Duration::from_secs(6)).await;

    assert_eq!(
        app.notification(),
        Some("Failed to start scan: Scan already running")
    );
    assert!(!app.alerts().is_polling());
    assert_eq!(backend.scan_results.calls(), 0);
}

#[tokio::test]
async fn rule_typed_and_submitted() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, mut events) = dashboard(&backend);
    let rule = "alert icmp any any -> any any (msg:\"ping\"; sid:1000001;)";

    app.router_mut().show(Page::Rules);
    for c in rule.chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;

    assert_eq!(app.rule_output(), Some(RULE_ADDED));
    assert_eq!(backend.add_rule.args(), vec![rule]);
}

#[tokio::test]
async fn rule_rejection_shown_in_output() {
    let backend = Arc::new(MockBackend::default());
    backend.add_rule.always(Err("Invalid rule syntax".into()));
    let (mut app, mut events) = dashboard(&backend);

    app.router_mut().show(Page::Rules);
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut events).await;

    assert_eq!(
        app.rule_output(),
        Some("Failed to add rule: Invalid rule syntax")
    );
}

#[tokio::test(start_paused = true)]
async fn render_traffic_page() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, mut events) = dashboard(&backend);
    app.startup();
    settle(&mut app, &mut events).await;

    app.router_mut().show(Page::Traffic);
    let text = screen(&app);

    assert!(text.contains("Network Traffic (Mbps)"));
    assert!(text.contains("eth0"));
    assert!(text.contains("wlan0"));
}

#[tokio::test]
async fn render_notification_over_page() {
    let backend = Arc::new(MockBackend::default());
    let (mut app, _events) = dashboard(&backend);

    app.router_mut().show(Page::Packets);
    press(&mut app, KeyCode::Enter);
    let text = screen(&app);

    assert!(text.contains("Please select a network interface."));
    assert!(text.contains("Notice"));
}
