pub mod api;
pub mod dashboard;
pub mod metrics;
pub mod monitor;
pub mod poller;
pub mod session;
pub mod units;
