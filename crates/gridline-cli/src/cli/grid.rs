//! The grid command: SVG in, grid lines out.

use std::fs;
use std::io::{self, Read};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use gridline::{GridBuilder, Rect, RunStats, Segment, Shape, SvgDocument, SvgLayerSink, YAxis};

use super::args::{GridArgs, OutputFormat};
use super::config::resolve_config;
use super::png::generate_png;

/// A line in JSON output format.
#[derive(Serialize)]
struct JsonLine {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl From<&Segment> for JsonLine {
    fn from(s: &Segment) -> Self {
        Self { x1: s.a.x, y1: s.a.y, x2: s.b.x, y2: s.b.y }
    }
}

#[derive(Serialize)]
struct JsonArtboard {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    y_axis: YAxis,
}

#[derive(Serialize)]
struct JsonOutput {
    layer: String,
    artboard: JsonArtboard,
    segments: Vec<JsonLine>,
    stats: RunStats,
}

/// Execute the grid command.
pub fn cmd_grid(args: &GridArgs) -> Result<()> {
    let config = resolve_config(args)?;

    let svg_content = read_input(&args.input)?;
    let document = SvgDocument::parse(&svg_content)
        .with_context(|| format!("Failed to load {}", args.input))?;

    let artboard = match &args.artboard {
        Some(text) => parse_artboard(text)?,
        None => document.artboard()?,
    };

    let selection = if args.select.is_empty() {
        document.select_all()
    } else {
        document.select(&args.select)?
    };
    info!(
        "Selected {} item(s), {} outline(s)",
        selection.len(),
        selection.iter().map(Shape::outline_count).sum::<usize>()
    );

    let start = Instant::now();
    let builder = GridBuilder::new(artboard, config)?;
    let mut sink = SvgLayerSink::for_document(&document);
    let out = builder.run(&selection, &mut sink)?;
    let layer_name = sink
        .layers()
        .get(out.layer)
        .map(|l| l.name.clone())
        .unwrap_or_default();

    eprintln!(
        "Generated {} grid lines from {} edges on layer \"{}\" in {:?}",
        out.stats.emitted,
        out.stats.edges,
        layer_name,
        start.elapsed()
    );

    let svg = sink.to_svg(&artboard);
    let output = match args.format {
        OutputFormat::Svg => svg.clone(),
        OutputFormat::Json => {
            let json = JsonOutput {
                layer: layer_name,
                artboard: JsonArtboard {
                    x: artboard.left(),
                    y: artboard.min_y(),
                    width: artboard.width(),
                    height: artboard.height(),
                    y_axis: artboard.y_axis(),
                },
                segments: out.segments().iter().map(JsonLine::from).collect(),
                stats: out.stats,
            };
            serde_json::to_string_pretty(&json).context("Failed to serialize JSON")?
        }
    };

    match args.output.as_deref() {
        Some("-") | None => {
            println!("{}", output);
        }
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("Wrote: {}", path);
        }
    }

    if let Some(png_path) = &args.png {
        let (w, h) = generate_png(&svg, png_path, args.png_scale)?;
        eprintln!("Wrote: {} ({}x{})", png_path, w, h);
    }

    Ok(())
}

/// Read the input file, or stdin for "-".
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read SVG from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

/// "x y w h" (commas allowed), the same syntax as an SVG viewBox.
pub fn parse_artboard(text: &str) -> Result<Rect> {
    let view_box = svgtypes::ViewBox::from_str(text)
        .map_err(|e| anyhow::anyhow!("invalid --artboard \"{}\": {}", text, e))?;
    Ok(Rect::from_origin_size(view_box.x, view_box.y, view_box.w, view_box.h)?)
}
