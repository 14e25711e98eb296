//! PNG preview of the generated grid.

use anyhow::{Context, Result, anyhow};
use log::info;
use tiny_skia::Pixmap;

/// Rasterise `svg_content` to `png_path` at `scale` pixels per unit.
pub fn generate_png(svg_content: &str, png_path: &str, scale: f64) -> Result<(u32, u32)> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).context("Failed to re-parse generated SVG")?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil().max(1.0) as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or_else(|| anyhow!("could not create a {}x{} pixmap", pixmap_width, pixmap_height))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("Failed to write {}", png_path))?;
    info!("Wrote PNG: {} ({}x{})", png_path, pixmap_width, pixmap_height);

    Ok((pixmap_width, pixmap_height))
}
