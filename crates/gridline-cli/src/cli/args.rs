//! Command line options for the grid command.

use anyhow::{Context, Result, bail};

/// Output format for generated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

/// Everything the grid command was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub struct GridArgs {
    /// Input SVG path, or "-" for stdin.
    pub input: String,
    pub output: Option<String>,
    pub format: OutputFormat,
    /// Element ids to select; empty means the whole drawing.
    pub select: Vec<String>,
    /// Artboard override, as a viewBox string "x y w h".
    pub artboard: Option<String>,
    pub config_path: Option<String>,
    pub tolerance: Option<f64>,
    pub layer_name: Option<String>,
    pub png: Option<String>,
    pub png_scale: f64,
    /// 0 = warn, 1 = info, 2+ = debug
    pub verbosity: u8,
}

impl Default for GridArgs {
    fn default() -> Self {
        Self {
            input: "-".to_string(),
            output: None,
            format: OutputFormat::Svg,
            select: Vec::new(),
            artboard: None,
            config_path: None,
            tolerance: None,
            layer_name: None,
            png: None,
            png_scale: 2.0,
            verbosity: 0,
        }
    }
}

/// What `main` should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Grid(GridArgs),
    Help,
    ExampleConfig,
}

/// Parse everything after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut parsed = GridArgs::default();
    let mut input: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" | "help" => return Ok(Command::Help),
            "--example-config" => return Ok(Command::ExampleConfig),
            "-o" | "--output" => {
                parsed.output = Some(value(args, &mut i)?.to_string());
            }
            "--json" => {
                parsed.format = OutputFormat::Json;
            }
            "-f" | "--format" => {
                parsed.format = match value(args, &mut i)?.to_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "svg" => OutputFormat::Svg,
                    other => bail!("Unknown format: {}. Use 'svg' or 'json'.", other),
                };
            }
            "--select" => {
                parsed.select.push(value(args, &mut i)?.to_string());
            }
            "--artboard" => {
                parsed.artboard = Some(value(args, &mut i)?.to_string());
            }
            "--config" => {
                parsed.config_path = Some(value(args, &mut i)?.to_string());
            }
            "--tolerance" => {
                let raw = value(args, &mut i)?;
                parsed.tolerance = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --tolerance value: {}", raw))?,
                );
            }
            "--layer" => {
                parsed.layer_name = Some(value(args, &mut i)?.to_string());
            }
            "--png" => {
                parsed.png = Some(value(args, &mut i)?.to_string());
            }
            "--png-scale" => {
                let raw = value(args, &mut i)?;
                parsed.png_scale = raw
                    .parse()
                    .with_context(|| format!("invalid --png-scale value: {}", raw))?;
            }
            "-v" | "--verbose" => {
                parsed.verbosity = parsed.verbosity.saturating_add(1);
            }
            "-vv" => {
                parsed.verbosity = parsed.verbosity.saturating_add(2);
            }
            other if other.starts_with('-') && other != "-" => {
                bail!("Unknown option: {}", other);
            }
            other => {
                if input.is_some() {
                    bail!("Unexpected argument: {}", other);
                }
                input = Some(other.to_string());
            }
        }
        i += 1;
    }

    match input {
        Some(path) => {
            parsed.input = path;
            Ok(Command::Grid(parsed))
        }
        None => Ok(Command::Help),
    }
}

/// The value following the option at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", option))
}

pub fn print_usage() {
    eprintln!("gridline - extend every edge of the selected artwork to the artboard");
    eprintln!();
    eprintln!("Usage: gridline <input.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  --json                  Output as JSON instead of SVG");
    eprintln!("  -f, --format <fmt>      'svg' or 'json'");
    eprintln!("  --select <id>           Select an element by id (repeatable, default: everything)");
    eprintln!("  --artboard \"x y w h\"    Override the artboard (default: document size)");
    eprintln!("  --config <file.yaml>    Load settings from YAML");
    eprintln!("  --tolerance <n>         Same-line tolerance per axis (default: 0.001)");
    eprintln!("  --layer <name>          Base name of the output layer (default: Grid Lines)");
    eprintln!("  --png <file>            Also rasterise the result to PNG");
    eprintln!("  --png-scale <n>         PNG scale factor (default: 2)");
    eprintln!("  --example-config        Print an example config YAML");
    eprintln!("  -v, -vv                 More logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Use '-' as input to read from stdin");
}
