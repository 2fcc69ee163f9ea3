pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConvertArgs, DetectArgs};
pub use output::{OutputFormat, OutputFormatter};
