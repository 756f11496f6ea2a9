use crate::models::{MetricSample, MetricsHistory, SeriesId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-series rolling windows behind the live charts. Windows are created
/// lazily on first append; every window in one store shares the same
/// capacity. Snapshots are owned copies, so a reader never observes a
/// half-applied append.
#[derive(Clone)]
pub struct MetricsStore {
    windows: Arc<RwLock<HashMap<SeriesId, MetricsHistory>>>,
    max_points: usize,
}

impl MetricsStore {
    pub fn new(max_points: usize) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            max_points,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_points
    }

    pub async fn append(&self, series: &SeriesId, value: f64) {
        let mut windows = self.windows.write().await;

        let window = windows
            .entry(series.clone())
            .or_insert_with(|| MetricsHistory::new(self.max_points));

        window.push_value(value);
    }

    /// Current window for `series`, oldest first. Unknown series yields an
    /// empty vec so a freshly mounted view renders before its first sample.
    pub async fn snapshot(&self, series: &SeriesId) -> Vec<MetricSample> {
        self.windows
            .read()
            .await
            .get(series)
            .map(|w| w.snapshot())
            .unwrap_or_default()
    }

    pub async fn snapshot_all(&self) -> HashMap<SeriesId, Vec<MetricSample>> {
        self.windows
            .read()
            .await
            .iter()
            .map(|(series, window)| (series.clone(), window.snapshot()))
            .collect()
    }

    pub async fn latest_value(&self, series: &SeriesId) -> Option<f64> {
        self.windows
            .read()
            .await
            .get(series)
            .and_then(|w| w.latest().map(|s| s.value))
    }

    pub async fn clear(&self, series: &SeriesId) {
        self.windows.write().await.remove(series);
    }

    pub async fn clear_all(&self) {
        self.windows.write().await.clear();
    }
}
