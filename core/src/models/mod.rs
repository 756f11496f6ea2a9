pub mod config;
mod metrics;
mod peer;
mod stats;
mod user;

pub use config::*;
pub use metrics::*;
pub use peer::*;
pub use stats::*;
pub use user::*;
