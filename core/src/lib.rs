pub mod models;
pub mod services;

pub use models::*;
pub use services::api::{ApiClient, ApiError};
pub use services::dashboard::{format_data_size, CardKind, CardValue, DashboardCard, SUMMARY_CARDS};
pub use services::metrics::MetricsStore;
pub use services::monitor::{HostStatsMonitor, TrafficMonitor};
pub use services::poller::Poller;
pub use services::session::SessionStore;
pub use services::units::{parse_io_pair, parse_magnitude};
