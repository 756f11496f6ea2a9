use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    pub peer_poll_interval_ms: u64,
    pub host_poll_interval_ms: u64,
    pub traffic_window_points: usize,
    pub finder_window_points: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            peer_poll_interval_ms: 1000,
            host_poll_interval_ms: 5000,
            traffic_window_points: 9,
            finder_window_points: 60,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_path = config_dir.join("peerview").join("config.toml");
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let app_config_dir = config_dir.join("peerview");

        std::fs::create_dir_all(&app_config_dir)?;
        self.save_to(&app_config_dir.join("config.toml"))
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn peer_poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.peer_poll_interval_ms)
    }

    pub fn host_poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.host_poll_interval_ms)
    }
}
