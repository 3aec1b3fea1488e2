pub mod commands;

pub use commands::{align, process, Cli, Commands};
