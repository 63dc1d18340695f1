use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::GenerationConfig;
use crate::trivia::GenerationProfiles;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub generation: GenerationSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationSettings {
    pub question: GenerationConfig,
    pub answer_check: GenerationConfig,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path_static()?;
        let mut settings = Self::load_from(&config_path)?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads `path`, or returns defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let settings: Settings = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies `TRIVIA_ORACLE_HOST`, `PORT`, `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TRIVIA_ORACLE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model.name = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            self.model.base_url = base_url;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.generation
            .question
            .validate()
            .context("Invalid [generation.question] settings")?;
        self.generation
            .answer_check
            .validate()
            .context("Invalid [generation.answer_check] settings")?;
        if self.model.timeout_secs == 0 {
            anyhow::bail!("model.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn generation_profiles(&self) -> GenerationProfiles {
        GenerationProfiles {
            question: self.generation.question.clone(),
            answer_check: self.generation.answer_check.clone(),
        }
    }

    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("{API_KEY_ENV} is not set"))
    }

    pub fn get_config_path(&self) -> Result<PathBuf> {
        Self::get_config_path_static()
    }

    fn get_config_path_static() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        Ok(home_dir.join(".trivia-oracle").join("config.toml"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            model: ModelConfig {
                name: "gemini-1.5-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout_secs: 30,
                max_retries: 0,
            },
            generation: GenerationSettings {
                question: GenerationConfig::for_question(),
                answer_check: GenerationConfig::for_answer_check(),
            },
        }
    }
}
