//! Entry points: command-line parsing and output rendering.

pub mod cli;
pub mod render;

pub use cli::{run, Cli, Command};
