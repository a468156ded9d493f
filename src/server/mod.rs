//! Quiz HTTP API.
//!
//! Serves sampled quizzes and forwards explanation and study-guide
//! requests to the configured text generator.

mod config;
mod error;
mod routes;
mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{AppState, quiz_routes};
pub use server::HttpServer;
