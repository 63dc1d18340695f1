pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands};
pub use commands::CommandHandler;
pub use output::{OutputFormatter, Spinner};
