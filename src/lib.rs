pub mod ai;
pub mod cli;
pub mod config;
pub mod server;
pub mod trivia;

pub use ai::{GeminiClient, ModelGateway};
pub use cli::{Cli, CommandHandler, Commands};
pub use config::Settings;
pub use trivia::{AnswerVerdict, Question, TriviaOrchestrator};
