pub mod gateway;
pub mod gemini_client;
pub mod prompt;
pub mod response;

pub use gateway::{GatewayError, GenerationConfig, ModelGateway, ResponseFormat};
pub use gemini_client::GeminiClient;
pub use prompt::PromptBuilder;
pub use response::{ParseError, ResponseParser};
