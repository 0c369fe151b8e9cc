//! Pipeline configuration
//!
//! Generation parameters are fixed per deployment, not tunable per call.
//! Defaults follow the reference deployment; `from_env` picks up the
//! `GEMINI_*` overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation parameters sent with every analysis request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.5,
            top_k: 20,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Model name for the Vertex AI endpoint
    pub model: String,
    pub generation: GenerationConfig,
    /// Total attempts per invocation, including the first
    pub max_attempts: u32,
    /// Linear backoff base: wait `retry_delay * attempt` between attempts
    pub retry_delay: Duration,
    /// Per-attempt timeout; video payloads are large, so this is much
    /// longer than the 10s credential-exchange timeout used upstream
    pub request_timeout: Duration,
    /// Soft warning threshold; the service hard limit is ~20 MB
    pub size_warn_bytes: usize,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".into(),
            generation: GenerationConfig::default(),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(300),
            size_warn_bytes: 15 * 1024 * 1024,
        }
    }
}

impl EnhancerConfig {
    /// Build a config from environment overrides, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = std::env::var("MODEL_NAME") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        if let Some(v) = env_parse::<f32>("GEMINI_TEMPERATURE") {
            config.generation.temperature = v;
        }
        if let Some(v) = env_parse::<f32>("GEMINI_TOP_P") {
            config.generation.top_p = v;
        }
        if let Some(v) = env_parse::<u32>("GEMINI_TOP_K") {
            config.generation.top_k = v;
        }
        if let Some(v) = env_parse::<u32>("GEMINI_MAX_OUTPUT_TOKENS") {
            config.generation.max_output_tokens = v;
        }
        if let Some(v) = env_parse::<u32>("GEMINI_MAX_RETRIES") {
            config.max_attempts = v.max(1);
        }
        if let Some(v) = env_parse::<u64>("GEMINI_RETRY_DELAY_SECONDS") {
            config.retry_delay = Duration::from_secs(v);
        }
        if let Some(v) = env_parse::<u64>("GEMINI_TIMEOUT_SECONDS") {
            config.request_timeout = Duration::from_secs(v);
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.top_k, 20);
        assert_eq!(config.max_output_tokens, 8192);
    }

    #[test]
    fn test_default_retry_policy() {
        let config = EnhancerConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.size_warn_bytes, 15 * 1024 * 1024);
    }
}
