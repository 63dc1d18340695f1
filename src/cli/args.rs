use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trivia-oracle")]
#[command(about = "Trivia questions and answer grading backed by Gemini")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate one trivia question
    Question,
    /// Grade an answer to a question
    Check {
        /// The trivia question
        question: String,
        /// The answer to grade
        answer: String,
    },
    /// Show configuration
    Config {
        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
    /// Run diagnostics
    Doctor,
    /// Show version information
    Version,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            host: None,
            port: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["trivia-oracle"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn check_takes_question_and_answer() {
        let cli = Cli::try_parse_from([
            "trivia-oracle",
            "check",
            "What is the capital of France?",
            "Paris",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Check { question, answer }) => {
                assert_eq!(question, "What is the capital of France?");
                assert_eq!(answer, "Paris");
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn serve_accepts_port() {
        let cli = Cli::try_parse_from(["trivia-oracle", "serve", "--port", "3000", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Serve { port: Some(3000), .. })
        ));
    }
}
