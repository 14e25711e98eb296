//! SVG in, SVG out.
//!
//! Input: usvg resolves CSS, transforms and basic shapes, then we walk the
//! tree and keep only anchors. Curve commands contribute their end anchor;
//! control points aren't anchors and no curve is flattened.
//!
//! Output: [`SvgLayerSink`] collects grid lines into layer groups and writes
//! them out as a standalone document.

use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use usvg::tiny_skia_path::PathSegment;

use crate::error::GridError;
use crate::geometry::{Point, Rect, Segment};
use crate::shape::{Outline, Shape};
use crate::sink::{GridSink, StrokeStyle, unique_layer_name_by};

/// A parsed SVG document acting as the host drawing.
pub struct SvgDocument {
    tree: usvg::Tree,
    names: Vec<String>,
}

impl SvgDocument {
    pub fn parse(svg_content: &str) -> Result<Self, GridError> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg_content, &options)
            .map_err(|e| GridError::Svg(e.to_string()))?;
        let names = collect_names(svg_content)?;
        debug!("parsed SVG: {} named elements", names.len());
        Ok(Self { tree, names })
    }

    /// The document canvas, in the coordinates shapes are reported in.
    pub fn artboard(&self) -> Result<Rect, GridError> {
        let size = self.tree.size();
        Rect::from_origin_size(0.0, 0.0, size.width() as f64, size.height() as f64)
    }

    /// Every top-level item, as if the whole drawing were selected.
    pub fn select_all(&self) -> Vec<Shape> {
        self.tree.root().children().iter().map(shape_from_node).collect()
    }

    /// The elements with the given ids, in the order the ids are given.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Shape>, GridError> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.tree
                    .node_by_id(id)
                    .map(shape_from_node)
                    .ok_or_else(|| GridError::UnknownSelection(id.to_string()))
            })
            .collect()
    }

    /// Ids and layer labels already used in the source document.
    pub fn existing_names(&self) -> &[String] {
        &self.names
    }
}

/// Scan raw XML for `id` and `inkscape:label` values.
///
/// usvg only keeps ids on elements it renders, so a hidden layer or a
/// `<defs>` entry would otherwise be invisible to the layer naming.
fn collect_names(content: &str) -> Result<Vec<String>, GridError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut names = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                for attr in e.attributes().flatten() {
                    let key = attr.key.as_ref();
                    if key == b"id" || key == b"inkscape:label" {
                        let value = attr
                            .unescape_value()
                            .map_err(|e| GridError::Svg(e.to_string()))?;
                        if !names.iter().any(|n: &String| n == value.as_ref()) {
                            names.push(value.into_owned());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GridError::Svg(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

fn shape_from_node(node: &usvg::Node) -> Shape {
    match node {
        usvg::Node::Group(group) => Shape::group(group.children().iter().map(shape_from_node).collect()),
        usvg::Node::Path(path) => shape_from_path(path),
        // Text, images: nothing to draw lines from
        _ => Shape::Other,
    }
}

/// One subpath becomes an outline; several become a compound outline.
fn shape_from_path(path: &usvg::Path) -> Shape {
    let data = match path.data().clone().transform(path.abs_transform()) {
        Some(data) => data,
        None => {
            warn!("path \"{}\" could not be transformed, using local coordinates", path.id());
            path.data().clone()
        }
    };

    let mut outlines: Vec<Outline> = Vec::new();
    let mut anchors: Vec<Point> = Vec::new();

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !anchors.is_empty() {
                    outlines.push(Outline::new(std::mem::take(&mut anchors)));
                }
                anchors.push(Point::new(p.x as f64, p.y as f64));
            }
            PathSegment::LineTo(p) | PathSegment::QuadTo(_, p) | PathSegment::CubicTo(_, _, p) => {
                anchors.push(Point::new(p.x as f64, p.y as f64));
            }
            PathSegment::Close => {
                // An explicit return to the start isn't an anchor of its own.
                if anchors.len() > 1 && anchors.first() == anchors.last() {
                    anchors.pop();
                }
            }
        }
    }
    if !anchors.is_empty() {
        outlines.push(Outline::new(anchors));
    }

    match outlines.len() {
        0 => Shape::Other,
        1 => Shape::Outline(outlines.remove(0)),
        _ => Shape::compound(outlines),
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// A `<g>` layer of `<line>` elements.
///
/// `name` is what an editor shows (`inkscape:label`); `id` is the same name
/// reduced to an XML-safe token.
#[derive(Debug, Clone, Default)]
pub struct SvgLayer {
    pub name: String,
    pub id: String,
    pub lines: Vec<String>,
}

/// Lowercase ASCII letters and digits, every other run of characters
/// collapsed to `-`: "Grid Lines 2" becomes `grid-lines-2`.
///
/// Ids may not start with a digit or be empty, so those get a `layer-`
/// prefix.
pub fn layer_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    match id.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => id,
        Some(_) => format!("layer-{id}"),
        None => "layer".to_string(),
    }
}

/// Writes grid lines into SVG layer groups.
#[derive(Debug, Clone, Default)]
pub struct SvgLayerSink {
    existing: Vec<String>,
    layers: Vec<SvgLayer>,
}

impl SvgLayerSink {
    /// `existing` are the names the new layer must not collide with.
    pub fn new(existing: Vec<String>) -> Self {
        Self { existing, layers: Vec::new() }
    }

    /// Sink that avoids every name already in `document`.
    pub fn for_document(document: &SvgDocument) -> Self {
        Self::new(document.existing_names().to_vec())
    }

    pub fn layers(&self) -> &[SvgLayer] {
        &self.layers
    }

    /// Standalone SVG whose viewBox is `artboard`.
    pub fn to_svg(&self, artboard: &Rect) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" viewBox="{} {} {} {}" width="{}" height="{}">
"#,
            artboard.left(),
            artboard.min_y(),
            artboard.width(),
            artboard.height(),
            artboard.width(),
            artboard.height(),
        ));

        for layer in &self.layers {
            svg.push_str(&format!(
                "<g id=\"{}\" inkscape:label=\"{}\" inkscape:groupmode=\"layer\">\n",
                layer.id,
                quick_xml::escape::escape(layer.name.as_str())
            ));
            for line in &layer.lines {
                svg.push_str("  ");
                svg.push_str(line);
                svg.push('\n');
            }
            svg.push_str("</g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl GridSink for SvgLayerSink {
    type Layer = usize;

    fn open_layer(&mut self, base_name: &str) -> Result<usize, GridError> {
        // Both the label and the derived id must be free, against the
        // source document and against layers opened earlier.
        let taken = |candidate: &str| {
            let id = layer_id(candidate);
            self.existing.iter().any(|e| e == candidate || *e == id)
                || self.layers.iter().any(|l| l.name == candidate || l.id == id)
        };
        let name = unique_layer_name_by(base_name, taken);
        if name != base_name {
            debug!("layer \"{}\" exists, using \"{}\"", base_name, name);
        }
        let id = layer_id(&name);
        self.layers.push(SvgLayer { name, id, lines: Vec::new() });
        Ok(self.layers.len() - 1)
    }

    fn emit(&mut self, layer: &usize, segment: &Segment, style: &StrokeStyle) -> Result<(), GridError> {
        let target = self
            .layers
            .get_mut(*layer)
            .ok_or_else(|| GridError::Sink(format!("no layer with index {layer}")))?;
        let color = quick_xml::escape::escape(style.color.to_svg());
        target.lines.push(format!(
            "<line x1=\"{:.4}\" y1=\"{:.4}\" x2=\"{:.4}\" y2=\"{:.4}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\"/>",
            segment.a.x, segment.a.y, segment.b.x, segment.b.y, color, style.width
        ));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edge;

    #[test]
    fn artboard_from_viewbox() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"><rect x="10" y="10" width="20" height="20"/></svg>"#,
        )
        .unwrap();
        let rect = doc.artboard().unwrap();
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 100.0);
    }

    #[test]
    fn rect_becomes_four_anchor_outline() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect x="10" y="20" width="30" height="40"/></svg>"#,
        )
        .unwrap();
        let selection = doc.select_all();
        assert_eq!(selection.len(), 1);
        match &selection[0] {
            Shape::Outline(outline) => {
                assert_eq!(outline.anchors.len(), 4);
                assert!(outline.anchors.contains(&Point::new(10.0, 20.0)));
                assert!(outline.anchors.contains(&Point::new(40.0, 60.0)));
            }
            other => panic!("expected outline, got {:?}", other),
        }
    }

    #[test]
    fn closing_anchor_is_dropped() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M 10 10 L 90 10 L 50 90 L 10 10 Z"/></svg>"#,
        )
        .unwrap();
        let edges: Vec<Edge> = doc.select_all()[0].edges().collect();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| !e.is_degenerate()));
    }

    #[test]
    fn multiple_subpaths_become_compound() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 10 10 H 90 V 90 H 10 Z M 30 30 H 70 V 70 H 30 Z" fill-rule="evenodd"/>
            </svg>"#,
        )
        .unwrap();
        let selection = doc.select_all();
        assert!(matches!(&selection[0], Shape::Compound { outlines } if outlines.len() == 2));
        assert_eq!(selection[0].edges().count(), 8);
    }

    #[test]
    fn curves_contribute_end_anchor_only() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M 10 10 C 40 10 60 90 90 90 L 90 10 Z"/></svg>"#,
        )
        .unwrap();
        match &doc.select_all()[0] {
            Shape::Outline(outline) => assert_eq!(outline.anchors.len(), 3),
            other => panic!("expected outline, got {:?}", other),
        }
    }

    #[test]
    fn transforms_are_applied() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <g id="moved" transform="translate(50 0)"><path d="M 0 10 L 10 10 L 10 20 Z"/></g>
            </svg>"#,
        )
        .unwrap();
        let first = doc.select_all()[0].edges().next().unwrap();
        assert_eq!(first.start, Point::new(50.0, 10.0));
    }

    #[test]
    fn select_by_id() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect id="a" x="10" y="10" width="10" height="10"/>
                <rect id="b" x="50" y="50" width="10" height="10"/>
            </svg>"#,
        )
        .unwrap();
        let picked = doc.select(&["b"]).unwrap();
        assert_eq!(picked.len(), 1);
        assert!(picked[0].edges().all(|e| e.start.x >= 50.0));
        assert!(matches!(doc.select(&["nope"]), Err(GridError::UnknownSelection(id)) if id == "nope"));
    }

    #[test]
    fn existing_names_include_labels() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" viewBox="0 0 100 100">
                <g id="layer1" inkscape:label="Grid Lines"><rect x="1" y="1" width="5" height="5"/></g>
            </svg>"#,
        )
        .unwrap();
        assert!(doc.existing_names().iter().any(|n| n == "layer1"));
        assert!(doc.existing_names().iter().any(|n| n == "Grid Lines"));
    }

    #[test]
    fn bad_svg_is_an_error() {
        assert!(matches!(SvgDocument::parse("<svg"), Err(GridError::Svg(_))));
    }

    #[test]
    fn layer_sink_writes_lines_into_named_group() {
        let mut sink = SvgLayerSink::new(vec!["Grid Lines".to_string()]);
        let layer = sink.open_layer("Grid Lines").unwrap();
        sink.emit(
            &layer,
            &Segment::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)),
            &StrokeStyle::default(),
        )
        .unwrap();

        let rect = Rect::y_down(0.0, 0.0, 100.0, 100.0).unwrap();
        let svg = sink.to_svg(&rect);
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
        assert!(svg.contains("<g id=\"grid-lines-2\" inkscape:label=\"Grid Lines 2\""));
        assert!(svg.contains(
            "<line x1=\"0.0000\" y1=\"50.0000\" x2=\"100.0000\" y2=\"50.0000\" stroke=\"#000000\" stroke-width=\"1\" fill=\"none\"/>"
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn layer_labels_are_escaped_and_ids_sanitised() {
        let mut sink = SvgLayerSink::default();
        sink.open_layer("A & B").unwrap();
        let svg = sink.to_svg(&Rect::y_down(0.0, 0.0, 10.0, 10.0).unwrap());
        assert!(svg.contains("<g id=\"a-b\" inkscape:label=\"A &amp; B\""), "{}", svg);
    }

    #[test]
    fn layer_id_is_an_xml_token() {
        assert_eq!(layer_id("Grid Lines"), "grid-lines");
        assert_eq!(layer_id("Grid Lines 2"), "grid-lines-2");
        assert_eq!(layer_id("  Guides -- (old) "), "guides-old");
        assert_eq!(layer_id("2024 grid"), "layer-2024-grid");
        assert_eq!(layer_id("&&"), "layer");
    }

    #[test]
    fn layer_avoids_an_existing_id_with_a_different_label() {
        let mut sink = SvgLayerSink::new(vec!["grid-lines".to_string()]);
        let layer = sink.open_layer("Grid Lines").unwrap();
        assert_eq!(sink.layers()[layer].name, "Grid Lines 2");
        assert_eq!(sink.layers()[layer].id, "grid-lines-2");

        // Opened layers count too.
        let second = sink.open_layer("grid lines").unwrap();
        assert_eq!(sink.layers()[second].name, "grid lines 3");
    }
}
