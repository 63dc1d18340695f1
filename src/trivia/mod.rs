pub mod orchestrator;
pub mod types;

pub use orchestrator::{ErrorKind, GenerationProfiles, OrchestratorError, TriviaOrchestrator};
pub use types::{AnswerCheckRequest, AnswerVerdict, Question};
