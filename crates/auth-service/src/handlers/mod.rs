//! HTTP handlers.

pub mod auth_handler;
pub mod health;
pub mod me;
pub mod metrics;

pub use auth_handler::handle_issue_token;
pub use health::health_check;
pub use me::get_me;
pub use metrics::metrics_handler;
