// External dependencies
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

// Internal dependencies
use crate::ai::gateway::{GatewayError, GenerationConfig, ModelGateway, ResponseFormat};
use crate::config::ModelConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Gemini API Structures
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

impl From<&GenerationConfig> for GeminiGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        let response_mime_type = match config.response_format {
            ResponseFormat::Json => Some("application/json"),
            ResponseFormat::Text => None,
        };

        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            response_mime_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    base_url: Url,
    model_name: String,
    api_key: String,
    timeout: Duration,
}

// ============================================================================
// Client Implementation
// ============================================================================

impl GeminiClient {
    /// Creates a client for the configured Gemini model
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key not set");
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        // Endpoint paths are joined relative to the base, so a proxy prefix
        // such as `https://host/gemini` must end in `/` to survive the join.
        let mut base_url = Url::parse(&config.base_url).context("Invalid Gemini base URL")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            model_name: config.name.clone(),
            api_key,
            timeout,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Verifies that the API key is accepted and the model exists
    pub async fn verify_connection(&self) -> Result<()> {
        debug!("Verifying Gemini connection");

        let url = self
            .base_url
            .join(&format!("v1beta/models/{}", self.model_name))
            .context("Failed to build model URL")?;

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .context("Failed to connect to Gemini service")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Gemini service returned error: {}",
                response.status()
            ));
        }

        info!("Gemini connection verified for model {}", self.model_name);
        Ok(())
    }

    fn generate_url(&self) -> Result<Url, GatewayError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model_name))
            .map_err(|e| GatewayError::Request(format!("Failed to build generate URL: {e}")))
    }

    fn request_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout.as_millis() as u64)
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        let url = self.generate_url()?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: config.into(),
        };

        debug!("Sending request to Gemini, prompt length: {}", prompt.len());

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned error {status}");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let generate_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.request_error(e))?;

        let text = extract_text(generate_response)?;
        debug!("Generated response length: {}", text.len());
        Ok(text)
    }
}

/// Concatenates the text parts of the first candidate. A blocked prompt has
/// no candidates and yields empty text like any other empty reply.
fn extract_text(response: GenerateContentResponse) -> Result<String, GatewayError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => warn!("Prompt blocked by Gemini: {reason}"),
            None => warn!("Gemini returned no candidates"),
        }
        return Ok(String::new());
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            warn!("Generation finished early: {reason}");
        }
    }

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}
