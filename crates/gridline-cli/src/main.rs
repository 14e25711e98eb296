//! gridline - artboard grid lines from SVG artwork
//!
//! Usage:
//!   gridline <svg> [options]           Extend every edge to the artboard
//!   gridline --example-config          Print an example config YAML
//!   gridline help                      Show options

mod cli;

use std::env;
use std::process;

use cli::{Command, cmd_grid, parse_args, print_example, print_usage};

fn main() {
    let args: Vec<String> = env::args().collect();

    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!();
            print_usage();
            process::exit(2);
        }
    };

    match command {
        Command::Help => print_usage(),
        Command::ExampleConfig => print_example(),
        Command::Grid(grid_args) => {
            init_logging(grid_args.verbosity);
            if let Err(e) = cmd_grid(&grid_args) {
                eprintln!("Error: {:#}", e);
                process::exit(1);
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise -v/-vv pick the level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", level))
        .format_timestamp(None)
        .try_init();
}
