use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::SystemTime;

/// Identifier for one chart series: a peer window, or a fixed key for
/// totals/host-level figures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId(pub String);

impl SeriesId {
    pub fn rx(peer: &crate::models::PeerId) -> Self {
        SeriesId(format!("{}:rx", peer.0))
    }

    pub fn tx(peer: &crate::models::PeerId) -> Self {
        SeriesId(format!("{}:tx", peer.0))
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        SeriesId(value.to_string())
    }
}

/// A single timestamped observation. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: SystemTime,
    pub value: f64,
}

impl MetricSample {
    pub fn now(value: f64) -> Self {
        Self {
            timestamp: SystemTime::now(),
            value,
        }
    }
}

/// Fixed-capacity FIFO window of the most recent samples, oldest first.
/// Capacity is set at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsHistory {
    samples: VecDeque<MetricSample>,
    max_points: usize,
}

impl MetricsHistory {
    pub fn new(max_points: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_points),
            max_points,
        }
    }

    pub fn add_sample(&mut self, sample: MetricSample) {
        if self.samples.len() >= self.max_points {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn push_value(&mut self, value: f64) {
        self.add_sample(MetricSample::now(value));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    /// Owned copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.samples.iter().copied().collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.samples.iter().map(|s| s.value).sum::<f64>() / self.samples.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_never_exceeded() {
        let mut history = MetricsHistory::new(8);
        for i in 0..10 {
            history.push_value(i as f64);
            assert!(history.len() <= 8);
        }
        assert_eq!(history.len(), 8);
        // v0 and v1 evicted, oldest first
        assert_eq!(history.values(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn shorter_than_capacity_keeps_everything() {
        let mut history = MetricsHistory::new(9);
        for i in 0..4 {
            history.push_value(i as f64);
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.values(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn average_of_empty_window_is_zero() {
        let history = MetricsHistory::new(9);
        assert_eq!(history.average(), 0.0);
    }

    #[test]
    fn latest_tracks_newest_sample() {
        let mut history = MetricsHistory::new(3);
        assert!(history.latest().is_none());
        history.push_value(1.5);
        history.push_value(2.5);
        assert_eq!(history.latest().unwrap().value, 2.5);
    }
}
