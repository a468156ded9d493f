//! HTTP server configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::DEFAULT_QUESTIONS_PATH;
use crate::generation::TutorTimeouts;
use crate::protocol::DEFAULT_PORT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8712)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Question bank loaded at startup
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_explain_timeout_secs")]
    pub explain_timeout_secs: u64,

    #[serde(default = "default_study_guide_timeout_secs")]
    pub study_guide_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_questions_path() -> PathBuf {
    PathBuf::from(DEFAULT_QUESTIONS_PATH)
}

fn default_explain_timeout_secs() -> u64 {
    25
}

fn default_study_guide_timeout_secs() -> u64 {
    45
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            questions_path: default_questions_path(),
            cors_origins: Vec::new(),
            explain_timeout_secs: default_explain_timeout_secs(),
            study_guide_timeout_secs: default_study_guide_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tutor_timeouts(&self) -> TutorTimeouts {
        TutorTimeouts {
            explanation: Duration::from_secs(self.explain_timeout_secs),
            study_guide: Duration::from_secs(self.study_guide_timeout_secs),
        }
    }
}
