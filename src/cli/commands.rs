use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::GeminiClient;
use crate::cli::{Commands, OutputFormatter, Spinner};
use crate::config::{DefaultConfig, Settings, API_KEY_ENV};
use crate::server;
use crate::trivia::TriviaOrchestrator;

pub fn version_info() -> String {
    format!(
        "trivia-oracle {}\nRust version: {}\nPlatform: {}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("TRIVIA_ORACLE_RUSTC_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub struct CommandHandler {
    settings: Settings,
    formatter: OutputFormatter,
}

impl CommandHandler {
    pub fn new() -> Result<Self> {
        let settings = Settings::load()?;
        Ok(Self::with_settings(settings))
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            formatter: OutputFormatter::default(),
        }
    }

    pub async fn handle_command(&mut self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { host, port } => self.handle_serve(host, port).await,
            Commands::Question => self.handle_question().await,
            Commands::Check { question, answer } => self.handle_check(&question, &answer).await,
            Commands::Config { init } => self.handle_config(init),
            Commands::Doctor => self.handle_doctor().await,
            Commands::Version => Ok(version_info()),
        }
    }

    fn gemini_client(&self) -> Result<GeminiClient> {
        let api_key = Settings::api_key()?;
        GeminiClient::new(&self.settings.model, api_key)
            .context("Failed to initialize Gemini client")
    }

    fn orchestrator(&self) -> Result<TriviaOrchestrator> {
        let client = self.gemini_client()?;
        info!("Using model {}", client.model_name());

        Ok(
            TriviaOrchestrator::new(Arc::new(client), self.settings.generation_profiles())
                .with_timeout(Duration::from_secs(self.settings.model.timeout_secs))
                .with_max_retries(self.settings.model.max_retries),
        )
    }

    async fn handle_serve(&mut self, host: Option<String>, port: Option<u16>) -> Result<String> {
        if let Some(host) = host {
            self.settings.server.host = host;
        }
        if let Some(port) = port {
            self.settings.server.port = port;
        }

        let orchestrator = self.orchestrator()?;
        server::serve(&self.settings.server, orchestrator).await?;
        Ok(String::new())
    }

    async fn handle_question(&self) -> Result<String> {
        let orchestrator = self.orchestrator()?;

        let spinner = Spinner::new("Thinking of a question...");
        let result = orchestrator.generate_question().await;
        spinner.stop();

        let question = result.context("Failed to generate question")?;
        Ok(self.formatter.format_question(&question))
    }

    async fn handle_check(&self, question: &str, answer: &str) -> Result<String> {
        let orchestrator = self.orchestrator()?;
        debug!("Grading answer for question: {question}");

        let spinner = Spinner::new("Grading answer...");
        let result = orchestrator.check_answer(question, answer).await;
        spinner.stop();

        let verdict = result.context("Failed to check answer")?;
        Ok(self.formatter.format_verdict(&verdict))
    }

    fn handle_config(&self, init: bool) -> Result<String> {
        let config_path = self.settings.get_config_path()?;

        if init {
            if config_path.exists() {
                return Ok(self.formatter.format_warning(&format!(
                    "Config file already exists at {}",
                    config_path.display()
                )));
            }
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&config_path, DefaultConfig::create_default_config_file())
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            return Ok(self.formatter.format_success(&format!(
                "Wrote default config to {}",
                config_path.display()
            )));
        }

        Ok(self.formatter.format_settings(
            &self.settings,
            &config_path.display().to_string(),
            Settings::api_key().is_ok(),
        ))
    }

    async fn handle_doctor(&self) -> Result<String> {
        let spinner = Spinner::new("Running diagnostics...");
        let mut diagnostics = Vec::new();

        match self.settings.get_config_path() {
            Ok(path) if path.exists() => {
                diagnostics.push(format!("✓ Config file found at {}", path.display()))
            }
            Ok(_) => diagnostics
                .push("ℹ No config file, using defaults (run: trivia-oracle config --init)".to_string()),
            Err(e) => diagnostics.push(format!("✗ Config path: {e}")),
        }

        match self.gemini_client() {
            Ok(client) => {
                diagnostics.push(format!("✓ {API_KEY_ENV} is set"));
                match client.verify_connection().await {
                    Ok(_) => diagnostics.push(format!(
                        "✓ Gemini model {} reachable",
                        client.model_name()
                    )),
                    Err(e) => diagnostics.push(format!("✗ Gemini service: {e}")),
                }
            }
            Err(e) => diagnostics.push(format!("✗ {e}")),
        }

        spinner.stop();
        Ok(format!(
            "Trivia Oracle Health Check:\n{}",
            diagnostics.join("\n")
        ))
    }

    pub fn format_error(&self, message: &str) -> String {
        self.formatter.format_error(message)
    }
}
