//! Drawing.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        Wrap,
    },
    Frame,
};

use super::app::App;
use crate::interfaces::InterfaceMenu;
use crate::router::Page;
use crate::view::{
    alert_rows, error_packet_rows, packet_rows, traffic_bars, ALERT_HEADERS, ERROR_PACKET_HEADERS,
    PACKET_HEADERS, TRAFFIC_TITLE,
};

const SIDEBAR_WIDTH: u16 = 20;
const MENU_WIDTH: u16 = 22;
const BAR_WIDTH: u16 = 9;

const HELP: &str = "\
Tab/Shift-Tab or 1-6   switch page
Up/Down                choose interface
Enter                  start (scan on IDS Alerts, submit on Rules)
x                      stop the page's feed
q / Ctrl-C             quit";

pub fn render(frame: &mut Frame, app: &App) {
    let [main, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
        .areas(frame.area());
    let [sidebar, content] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(main);

    draw_sidebar(frame, app, sidebar);

    match app.active_page() {
        Page::Introduce => draw_introduce(frame, app, content),
        Page::Traffic => draw_traffic(frame, app, content),
        Page::Alerts => draw_alerts(frame, app, content),
        Page::Packets => draw_packets(frame, app, content),
        Page::ErrorPackets => draw_error_packets(frame, app, content),
        Page::Rules => draw_rules(frame, app, content),
    }

    draw_status(frame, app, status);

    if let Some(message) = app.notification() {
        draw_notification(frame, message);
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Block title with a running/stopped marker
fn feed_title(name: &str, polling: bool) -> String {
    if polling {
        format!(" {} [running] ", name)
    } else {
        format!(" {} [stopped] ", name)
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| ListItem::new(format!("{} {}", i + 1, page.title())))
        .collect();
    let active = Page::ALL.iter().position(|p| *p == app.active_page());

    let list = List::new(items)
        .block(Block::bordered().title(" netsentry "))
        .highlight_style(highlight());
    let mut state = ListState::default().with_selected(active);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_menu(frame: &mut Frame, menu: &InterfaceMenu, area: Rect) {
    let items: Vec<ListItem> = menu
        .options()
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" Interface "))
        .highlight_style(highlight())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(menu.selected_index());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_table(
    frame: &mut Frame,
    title: String,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    area: Rect,
) {
    let widths = vec![Constraint::Fill(1); headers.len()];
    let header = Row::new(headers.iter().copied()).style(header_style());
    let table = Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(Block::bordered().title(title));
    frame.render_widget(table, area);
}

fn draw_introduce(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = Text::from(vec![
        Line::from(Span::styled(
            "Network monitoring dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Backend: {}", app.backend_url())),
        Line::from(""),
        Line::from("Traffic charts the selected interface's rate in Mbps."),
        Line::from("IDS Alerts starts a scan and follows its results."),
        Line::from("Packets and Error Packets show the most recent captures first."),
        Line::from("Rules sends a detection rule to the backend."),
        Line::from(""),
    ]);
    text.extend(HELP.lines().map(Line::from));

    let paragraph = Paragraph::new(text)
        .block(Block::bordered().title(" Introduction "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_traffic(frame: &mut Frame, app: &App, area: Rect) {
    let [menu, chart] =
        Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(0)]).areas(area);
    draw_menu(frame, app.traffic_menu(), menu);

    let data = traffic_bars(&app.traffic_series());
    let bars: Vec<Bar> = data
        .into_iter()
        .map(|bar| {
            Bar::default()
                .value(bar.height)
                .label(Line::from(bar.label))
                .text_value(bar.text)
        })
        .collect();

    let polling = app.traffic().is_polling();
    let title = match app.traffic().interface() {
        Some(name) => feed_title(&format!("{} - {}", TRAFFIC_TITLE, name), polling),
        None => feed_title(TRAFFIC_TITLE, polling),
    };
    let chart_widget = BarChart::default()
        .block(Block::bordered().title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart_widget, chart);
}

fn draw_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let rows = alert_rows(&app.alert_snapshot());
    let title = feed_title("IDS Alerts", app.alerts().is_polling());
    draw_table(frame, title, &ALERT_HEADERS, rows, area);
}

fn draw_packets(frame: &mut Frame, app: &App, area: Rect) {
    let [menu, table] =
        Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(0)]).areas(area);
    draw_menu(frame, app.packet_menu(), menu);

    let rows = packet_rows(&app.packet_snapshot());
    let title = feed_title("Packets", app.packets().is_polling());
    draw_table(frame, title, &PACKET_HEADERS, rows, table);
}

fn draw_error_packets(frame: &mut Frame, app: &App, area: Rect) {
    let rows = error_packet_rows(&app.error_packet_snapshot());
    let title = feed_title("Error Packets", app.error_packets().is_polling());
    draw_table(frame, title, &ERROR_PACKET_HEADERS, rows, area);
}

fn draw_rules(frame: &mut Frame, app: &App, area: Rect) {
    let [input, output] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let input_widget = Paragraph::new(format!("{}_", app.rule_input()))
        .block(Block::bordered().title(" Rule (Enter to submit, Esc to clear) "));
    frame.render_widget(input_widget, input);

    let output_widget = Paragraph::new(app.rule_output().unwrap_or_default())
        .block(Block::bordered().title(" Result "))
        .wrap(Wrap { trim: false });
    frame.render_widget(output_widget, output);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.status().unwrap_or("Tab: switch page  Enter: start  x: stop  q: quit");
    let line = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(line, area);
}

fn draw_notification(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 50, 5);
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::bordered()
            .title(" Notice ")
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
