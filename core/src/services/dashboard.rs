use crate::models::DashboardTotals;
use std::fmt;

/// The dashboard summary cards as one uniform list instead of hand-written
/// per-metric blocks: each card names its figure, the presentation layer
/// iterates and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    ConnectedPeers,
    TotalUsage,
    TotalReceived,
    TotalSent,
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardCard {
    pub kind: CardKind,
    pub title: &'static str,
    pub icon: &'static str,
}

pub const SUMMARY_CARDS: [DashboardCard; 4] = [
    DashboardCard {
        kind: CardKind::ConnectedPeers,
        title: "Connected Peers",
        icon: "users",
    },
    DashboardCard {
        kind: CardKind::TotalUsage,
        title: "Total Usage",
        icon: "activity",
    },
    DashboardCard {
        kind: CardKind::TotalReceived,
        title: "Total Received",
        icon: "plane-rx",
    },
    DashboardCard {
        kind: CardKind::TotalSent,
        title: "Total Sent",
        icon: "plane-tx",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardValue {
    /// Connected out of total handshaken peers.
    Ratio { connected: u64, total: u64 },
    /// A byte figure, formatted for humans on display.
    Bytes(f64),
}

impl DashboardCard {
    pub fn value(&self, totals: &DashboardTotals) -> CardValue {
        match self.kind {
            CardKind::ConnectedPeers => CardValue::Ratio {
                connected: totals.peer_count,
                total: totals.total_handshake,
            },
            CardKind::TotalUsage => CardValue::Bytes(totals.total_data),
            CardKind::TotalReceived => CardValue::Bytes(totals.total_rx),
            CardKind::TotalSent => CardValue::Bytes(totals.total_tx),
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Ratio { connected, total } => write!(f, "{connected} / {total}"),
            CardValue::Bytes(bytes) => write!(f, "{}", format_data_size(*bytes)),
        }
    }
}

/// Human-readable rendering of a raw byte count.
pub fn format_data_size(bytes: f64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if !(bytes > 0.0) {
        return "0 B".to_string();
    }

    let mut size = bytes;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{:.0} {}", size, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
