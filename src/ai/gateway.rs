use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Generation Parameters
// ============================================================================

/// Shape the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Text,
    Json,
}

/// Sampling parameters sent with every call of one operation type.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_format: ResponseFormat,
}

impl GenerationConfig {
    pub fn for_question() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 100,
            response_format: ResponseFormat::Text,
        }
    }

    pub fn for_answer_check() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 200,
            response_format: ResponseFormat::Json,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("temperature must be within [0, 2], got {}", self.temperature);
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            anyhow::bail!("top_p must be within (0, 1], got {}", self.top_p);
        }
        if self.top_k == 0 {
            anyhow::bail!("top_k must be greater than zero");
        }
        if self.max_output_tokens == 0 {
            anyhow::bail!("max_output_tokens must be greater than zero");
        }
        Ok(())
    }
}

// ============================================================================
// Gateway Contract
// ============================================================================

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model request failed: {0}")]
    Request(String),

    #[error("model service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response could not be decoded: {0}")]
    Decode(String),

    #[error("model request timed out after {0}ms")]
    Timeout(u64),
}

// Timeouts land in `Request` here; callers that know their deadline report
// `Timeout` themselves.
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Request(err.to_string())
        }
    }
}

/// A text-completion backend.
///
/// One instance is shared by every in-flight request, so implementations
/// must tolerate concurrent calls.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Returns the single best completion for `prompt`. An empty string means
    /// the model produced no usable candidate.
    async fn generate(&self, prompt: &str, config: &GenerationConfig)
        -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationConfig::for_question().validate().is_ok());
        assert!(GenerationConfig::for_answer_check().validate().is_ok());
    }

    #[test]
    fn answer_check_asks_for_json_and_more_room() {
        let question = GenerationConfig::for_question();
        let check = GenerationConfig::for_answer_check();

        assert_eq!(check.response_format, ResponseFormat::Json);
        assert_eq!(question.response_format, ResponseFormat::Text);
        assert!(check.max_output_tokens > question.max_output_tokens);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut config = GenerationConfig::for_question();
        config.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_question();
        config.top_p = 0.0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_question();
        config.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_question();
        config.max_output_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn response_format_serializes_lowercase() {
        let json = serde_json::to_string(&ResponseFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }
}
