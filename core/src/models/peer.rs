use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(pub String);

/// One peer record as reported by the backend. `rx`/`tx` are cumulative byte
/// counters; a missing counter decodes as zero so a single incomplete record
/// never breaks a polling tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub id: PeerId,
    pub peer_name: String,
    pub assigned_ip: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub latest_handshake: Option<String>,
    #[serde(default)]
    pub rx: f64,
    #[serde(default)]
    pub tx: f64,
}

/// Aggregate figures behind the dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    #[serde(default)]
    pub peer_count: u64,
    #[serde(default)]
    pub total_handshake: u64,
    #[serde(default)]
    pub total_rx: f64,
    #[serde(default)]
    pub total_tx: f64,
    #[serde(default)]
    pub total_data: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_decodes_with_missing_counters() {
        let json = r#"{
            "id": "peer-7",
            "peer_name": "laptop",
            "assigned_ip": "10.8.0.7"
        }"#;

        let peer: Peer = serde_json::from_str(json).unwrap();
        assert_eq!(peer.id, PeerId("peer-7".to_string()));
        assert_eq!(peer.rx, 0.0);
        assert_eq!(peer.tx, 0.0);
        assert!(peer.endpoint.is_none());
    }

    #[test]
    fn totals_decode_from_backend_shape() {
        let json = r#"{
            "peer_count": 12,
            "total_handshake": 30,
            "total_rx": 1048576.0,
            "total_tx": 524288.0,
            "total_data": 1572864.0
        }"#;

        let totals: DashboardTotals = serde_json::from_str(json).unwrap();
        assert_eq!(totals.peer_count, 12);
        assert_eq!(totals.total_rx, 1048576.0);
    }
}
