//! Display projections
//!
//! Pure functions turning feed state into the rows and bars that get drawn.
//! Row numbers are positions in the current buffer, not stable ids: a
//! record's number grows as newer records arrive above it.

use netsentry_common::{AlertRecord, ErrorPacketRecord, PacketRecord};

use crate::feeds::TrafficPoint;

pub const ALERT_HEADERS: [&str; 4] = ["Time", "Message", "Source IP", "Destination IP"];

pub const PACKET_HEADERS: [&str; 6] = ["No.", "Source", "Destination", "Protocol", "Length", "Info"];

pub const ERROR_PACKET_HEADERS: [&str; 7] = [
    "No.",
    "Time",
    "Source",
    "Destination",
    "Protocol",
    "Length",
    "Info",
];

/// Chart title, also the dataset legend
pub const TRAFFIC_TITLE: &str = "Network Traffic (Mbps)";

/// Bar heights are integers, so rates are drawn in hundredths of a Mbps
const BAR_SCALE: f64 = 100.0;

pub fn alert_rows(alerts: &[AlertRecord]) -> Vec<Vec<String>> {
    alerts
        .iter()
        .map(|a| {
            vec![
                a.time.clone(),
                a.msg.clone(),
                a.source_ip.clone(),
                a.destination_ip.clone(),
            ]
        })
        .collect()
}

pub fn packet_rows(packets: &[PacketRecord]) -> Vec<Vec<String>> {
    packets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.source.clone(),
                p.destination.clone(),
                p.protocol.clone(),
                p.length.clone(),
                p.info.clone(),
            ]
        })
        .collect()
}

pub fn error_packet_rows(packets: &[ErrorPacketRecord]) -> Vec<Vec<String>> {
    packets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.time.clone(),
                p.source.clone(),
                p.destination.clone(),
                p.protocol.clone(),
                p.length.clone(),
                p.info.clone(),
            ]
        })
        .collect()
}

/// One chart bar: label, scaled height and the text printed on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarData {
    pub label: String,
    pub height: u64,
    pub text: String,
}

pub fn traffic_bars(series: &[TrafficPoint]) -> Vec<BarData> {
    series
        .iter()
        .map(|point| BarData {
            label: point.label.clone(),
            height: (point.mbps.max(0.0) * BAR_SCALE).round() as u64,
            text: format!("{:.2}", point.mbps),
        })
        .collect()
}

/// Render rows as aligned plain-text columns
pub fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = format_line(headers, &widths);
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&cells, &widths));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}
