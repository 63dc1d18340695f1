use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::ai::{
    GatewayError, GenerationConfig, ModelGateway, ParseError, PromptBuilder, ResponseParser,
};
use crate::trivia::{AnswerVerdict, Question};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Caller-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyOutput,
    MalformedModelOutput,
    UpstreamUnavailable,
    InvalidRequest,
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("model service unavailable: {0}")]
    UpstreamUnavailable(#[from] GatewayError),

    #[error("invalid model response: {0}")]
    InvalidModelResponse(#[from] ParseError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl OrchestratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestratorError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            OrchestratorError::InvalidModelResponse(ParseError::EmptyOutput) => {
                ErrorKind::EmptyOutput
            }
            OrchestratorError::InvalidModelResponse(ParseError::MalformedModelOutput {
                ..
            }) => ErrorKind::MalformedModelOutput,
            OrchestratorError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}

/// Generation parameters for each operation, fixed at construction.
#[derive(Debug, Clone)]
pub struct GenerationProfiles {
    pub question: GenerationConfig,
    pub answer_check: GenerationConfig,
}

impl Default for GenerationProfiles {
    fn default() -> Self {
        Self {
            question: GenerationConfig::for_question(),
            answer_check: GenerationConfig::for_answer_check(),
        }
    }
}

/// Runs prompt building, one model round trip and strict parsing for each
/// trivia operation. Cheap to clone; clones share the gateway.
#[derive(Clone)]
pub struct TriviaOrchestrator {
    gateway: Arc<dyn ModelGateway>,
    profiles: Arc<GenerationProfiles>,
    prompts: Arc<PromptBuilder>,
    parser: Arc<ResponseParser>,
    timeout: Duration,
    max_retries: u32,
}

impl TriviaOrchestrator {
    pub fn new(gateway: Arc<dyn ModelGateway>, profiles: GenerationProfiles) -> Self {
        Self {
            gateway,
            profiles: Arc::new(profiles),
            prompts: Arc::new(PromptBuilder::new()),
            parser: Arc::new(ResponseParser::new()),
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
        }
    }

    /// Deadline applied to each gateway call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extra attempts made only when the gateway itself fails.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub async fn generate_question(&self) -> Result<Question, OrchestratorError> {
        let prompt = self.prompts.build_question_prompt();
        let raw = self.call_model(&prompt, &self.profiles.question).await?;

        let question = self.parser.parse_question(&raw)?;
        info!("Generated question ({} chars)", question.text.len());
        Ok(question)
    }

    pub async fn check_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<AnswerVerdict, OrchestratorError> {
        if question.trim().is_empty() {
            return Err(OrchestratorError::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }

        let prompt = self.prompts.build_answer_check_prompt(question, answer);
        let raw = self.call_model(&prompt, &self.profiles.answer_check).await?;

        let verdict = self.parser.parse_answer_verdict(&raw).map_err(|e| {
            if let ParseError::MalformedModelOutput { raw, reason } = &e {
                warn!("Rejected verdict ({reason}): {raw}");
            }
            e
        })?;
        info!("Graded answer, correct: {}", verdict.correct);
        Ok(verdict)
    }

    async fn call_model(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                debug!(
                    "Retrying model call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let result =
                match tokio::time::timeout(self.timeout, self.gateway.generate(prompt, config))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::Timeout(self.timeout.as_millis() as u64)),
                };

            match result {
                Ok(raw) => return Ok(raw),
                Err(e) if attempt < self.max_retries => {
                    warn!("Model call failed: {e}");
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Model call failed: {e}");
                    return Err(e);
                }
            }
        }
    }
}
