use console::{style, Color};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::config::Settings;
use crate::trivia::{AnswerVerdict, Question};

pub struct OutputFormatter {
    use_colors: bool,
}

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn stop(self) {
        self.bar.finish_and_clear();
    }
}

impl OutputFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format_question(&self, question: &Question) -> String {
        format!("{} {}", self.style_text("Q:", Color::Cyan), question.text)
    }

    pub fn format_verdict(&self, verdict: &AnswerVerdict) -> String {
        let headline = if verdict.correct {
            self.format_success("Correct")
        } else {
            format!("{} Incorrect", self.style_text("✗", Color::Red))
        };

        format!(
            "{headline}\n{}\n{} {}",
            verdict.feedback,
            self.style_text("Did you know?", Color::Magenta),
            verdict.tidbit
        )
    }

    pub fn format_settings(&self, settings: &Settings, config_path: &str, has_key: bool) -> String {
        let key_status = if has_key {
            self.style_text("set", Color::Green)
        } else {
            self.style_text("missing", Color::Red)
        };

        format!(
            "Trivia Oracle Configuration:\n\
            - Config file: {config_path}\n\
            - Listen address: {}:{}\n\
            - Model: {}\n\
            - API base URL: {}\n\
            - Request timeout: {}s\n\
            - Max retries: {}\n\
            - Question generation: temperature {}, top-k {}, top-p {}, max tokens {}\n\
            - Answer grading: temperature {}, top-k {}, top-p {}, max tokens {}\n\
            - API key: {key_status}",
            settings.server.host,
            settings.server.port,
            settings.model.name,
            settings.model.base_url,
            settings.model.timeout_secs,
            settings.model.max_retries,
            settings.generation.question.temperature,
            settings.generation.question.top_k,
            settings.generation.question.top_p,
            settings.generation.question.max_output_tokens,
            settings.generation.answer_check.temperature,
            settings.generation.answer_check.top_k,
            settings.generation.answer_check.top_p,
            settings.generation.answer_check.max_output_tokens,
        )
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_text("Error:", Color::Red), message)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_text("✓", Color::Green), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_text("⚠", Color::Yellow), message)
    }

    fn style_text(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            style(text).fg(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(console::colors_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_verdict_lists_feedback_and_tidbit() {
        let formatter = OutputFormatter::new(false);
        let verdict = AnswerVerdict {
            correct: false,
            feedback: "Close, but no.".to_string(),
            tidbit: "Sydney is larger than Canberra.".to_string(),
        };

        let output = formatter.format_verdict(&verdict);
        assert!(output.starts_with("✗ Incorrect"));
        assert!(output.contains("Close, but no."));
        assert!(output.contains("Did you know? Sydney is larger than Canberra."));
    }

    #[test]
    fn plain_question_has_prefix() {
        let formatter = OutputFormatter::new(false);
        let question = Question {
            text: "What is the capital of France?".to_string(),
        };
        assert_eq!(
            formatter.format_question(&question),
            "Q: What is the capital of France?"
        );
    }

    #[test]
    fn settings_never_print_the_key() {
        let formatter = OutputFormatter::new(false);
        let output = formatter.format_settings(&Settings::default(), "/tmp/config.toml", true);
        assert!(output.contains("API key: set"));
        assert!(output.contains("Listen address: 0.0.0.0:8080"));
    }
}
