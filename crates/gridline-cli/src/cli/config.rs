//! YAML config files.
//!
//! A config file is a [`GridConfig`] in YAML. Every key is optional;
//! command line options override whatever the file sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridline::GridConfig;

use super::args::GridArgs;

/// Load a config from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GridConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<GridConfig> {
    Ok(serde_yaml::from_str(content)?)
}

/// Config file (or defaults) with command line overrides applied.
pub fn resolve_config(args: &GridArgs) -> Result<GridConfig> {
    let mut config = match &args.config_path {
        Some(path) => load_config(path)?,
        None => GridConfig::default(),
    };
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(name) = &args.layer_name {
        config.layer_name = name.clone();
    }
    config.validate()?;
    Ok(config)
}

pub fn print_example() {
    println!(r##"# Example gridline config
# Lines whose endpoints agree to within this many units (per axis) are
# treated as the same line.
tolerance: 0.001

# Base name for the output layer. A number is appended if the document
# already uses the name.
layer_name: "Grid Lines"

stroke:
  width: 1.0
  # registration, or e.g. {{ custom: "#00aeef" }}
  color: registration
"##);
}
