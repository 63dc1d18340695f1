pub mod defaults;
pub mod settings;

pub use defaults::DefaultConfig;
pub use settings::{GenerationSettings, ModelConfig, ServerConfig, Settings, API_KEY_ENV};
