//! Reasoning backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::HttpReasoningConfig;
use crate::application::OrchestratorSettings;

/// Reasoning backend connection and clarification loop settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReasoningConfig {
    /// Backend root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Safety cap on follow-up rounds; unset means unbounded
    #[serde(default)]
    pub max_follow_up_turns: Option<u32>,
}

impl ReasoningConfig {
    /// Get timeout as Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// HTTP adapter settings
    pub fn http_config(&self) -> HttpReasoningConfig {
        let config = HttpReasoningConfig::new(self.base_url.clone());
        match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    /// Orchestrator settings
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            max_follow_up_turns: self.max_follow_up_turns,
        }
    }

    /// Validate reasoning configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs > 3600 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_follow_up_turns == Some(0) {
            return Err(ValidationError::InvalidTurnLimit);
        }
        Ok(())
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_follow_up_turns: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}
