pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod goal;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;
pub mod stats;
pub mod topic;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
