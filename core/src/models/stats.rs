use serde::{Deserialize, Serialize};

/// Host resource figures as the backend reports them: docker-stats shaped
/// strings ("45.3%", "512MB / 1.2GB"). Transient input, parsed and discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatsRaw {
    #[serde(rename = "CPUPerc", default)]
    pub cpu_perc: String,
    #[serde(rename = "MemPerc", default)]
    pub mem_perc: String,
    #[serde(rename = "MemUsage", default)]
    pub mem_usage: String,
    #[serde(rename = "NetIO", default)]
    pub net_io: String,
    #[serde(rename = "BlockIO", default)]
    pub block_io: String,
    #[serde(rename = "PIDs", default)]
    pub pids: String,
}

/// Host figures after normalization: percentage points for utilization,
/// megabytes for every byte-valued figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostMetrics {
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub mem_used_mb: f64,
    pub mem_limit_mb: f64,
    pub net_rx_mb: f64,
    pub net_tx_mb: f64,
    pub block_read_mb: f64,
    pub block_write_mb: f64,
    pub pids: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_stats_decode_from_backend_keys() {
        let json = r#"{
            "CPUPerc": "45.3%",
            "MemPerc": "12.0%",
            "MemUsage": "512MB / 4GB",
            "NetIO": "123.4MB / 45.6KB",
            "BlockIO": "0B / 0B",
            "PIDs": "42"
        }"#;

        let raw: ServerStatsRaw = serde_json::from_str(json).unwrap();
        assert_eq!(raw.cpu_perc, "45.3%");
        assert_eq!(raw.net_io, "123.4MB / 45.6KB");
        assert_eq!(raw.pids, "42");
    }

    #[test]
    fn raw_stats_tolerate_missing_fields() {
        let raw: ServerStatsRaw = serde_json::from_str("{}").unwrap();
        assert!(raw.cpu_perc.is_empty());
        assert!(raw.net_io.is_empty());
    }
}
