//! CLI command implementations.
//!
//! - `args` - command line parsing
//! - `config` - YAML config files and overrides
//! - `grid` - the grid command itself
//! - `png` - PNG previews of the result

pub mod args;
pub mod config;
pub mod grid;
pub mod png;

pub use args::{Command, parse_args, print_usage};
pub use config::print_example;
pub use grid::cmd_grid;
