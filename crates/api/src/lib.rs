//! Chart pipeline boundary and HTTP API.
//!
//! This crate wires the collaborators from `poolchart-data` into the
//! history stages and exposes the result:
//! - `ChartService`, which never lets a collaborator failure escape
//! - Configuration loading
//! - An axum router serving pools and candles

/// Configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// Server startup and routes.
pub mod server;
/// Chart service.
pub mod services;
/// Application state.
pub mod state;

pub use config::{ChartConfig, ConfigError, ServerConfig};
pub use error::ApiError;
pub use server::{ApiServer, router};
pub use services::{ChartService, PoolChart};
pub use state::AppState;
