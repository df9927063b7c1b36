//! Standalone SVG output for both layout variants.
//!
//! This stays deliberately close to the data: person boxes, anchor dots and
//! plain lines, enough to eyeball a layout or embed it without the page's
//! graph surface.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::model::{Bounds, GraphDocument, NodeId, NodeRole, RowsLayout, ScenePrimitive};

/// Person boxes are drawn centered on the node position.
const NODE_BOX_WIDTH: f64 = 80.0;
const NODE_BOX_HEIGHT: f64 = 30.0;
/// Synthetic nodes (anchors, midpoints) render as small dots.
const ANCHOR_RADIUS: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// When true, include edge lines.
    pub include_edges: bool,
    /// When true, draw node labels.
    pub include_labels: bool,
    /// When true, wrap person boxes carrying an `href` in a link element.
    pub include_links: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            include_edges: true,
            include_labels: true,
            include_links: true,
        }
    }
}

const SVG_STYLE: &str = r#"<style>
.person-box { fill: #ffffff; stroke: #2563eb; stroke-width: 1; }
.person-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 11px; text-anchor: middle; dominant-baseline: central; }
.anchor-dot { fill: #6b7280; }
.edge { fill: none; stroke: #111827; stroke-width: 1; }
.row-box { fill: #ffffff; stroke: #2563eb; stroke-width: 1; }
.row-line { fill: none; stroke: #111827; stroke-width: 1; }
.row-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 11px; text-anchor: middle; dominant-baseline: central; }
</style>
"#;

/// Renders the node/edge graph. Edges draw first so boxes sit on top.
pub fn render_graph_svg(doc: &GraphDocument, options: &SvgRenderOptions) -> String {
    let graph = &doc.graph;

    let mut corner_points: Vec<(f64, f64)> = Vec::new();
    for node in &graph.nodes {
        let (hw, hh) = node_half_extent(node.id);
        corner_points.push((node.x - hw, node.y - hh));
        corner_points.push((node.x + hw, node.y + hh));
    }
    let bounds = Bounds::from_points(corner_points).unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 100.0,
        max_y: 100.0,
    });
    let pad = options.viewbox_padding.max(0.0);
    let vb_min_x = bounds.min_x - pad;
    let vb_min_y = bounds.min_y - pad;
    let vb_w = (bounds.max_x - bounds.min_x) + pad * 2.0;
    let vb_h = (bounds.max_y - bounds.min_y) + pad * 2.0;

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt(vb_min_x),
        fmt(vb_min_y),
        fmt(vb_w.max(1.0)),
        fmt(vb_h.max(1.0))
    );
    out.push_str(SVG_STYLE);

    if options.include_edges {
        let mut positions: FxHashMap<NodeId, (f64, f64)> = FxHashMap::default();
        for node in &graph.nodes {
            positions.insert(node.id, (node.x, node.y));
        }
        out.push_str(r#"<g class="edges">"#);
        for edge in &graph.edges {
            let (Some(&(x1, y1)), Some(&(x2, y2))) =
                (positions.get(&edge.source), positions.get(&edge.target))
            else {
                continue;
            };
            let _ = write!(
                &mut out,
                r#"<line class="edge" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                fmt(x1),
                fmt(y1),
                fmt(x2),
                fmt(y2)
            );
        }
        out.push_str("</g>\n");
    }

    out.push_str(r#"<g class="nodes">"#);
    for node in &graph.nodes {
        if node.id.role() == NodeRole::Person {
            let linked = options.include_links && node.href.is_some();
            if linked {
                if let Some(href) = &node.href {
                    let _ = write!(&mut out, r#"<a href="{}">"#, escape_xml(href));
                }
            }
            let _ = write!(
                &mut out,
                r#"<rect class="person-box" x="{}" y="{}" width="{}" height="{}" />"#,
                fmt(node.x - NODE_BOX_WIDTH / 2.0),
                fmt(node.y - NODE_BOX_HEIGHT / 2.0),
                fmt(NODE_BOX_WIDTH),
                fmt(NODE_BOX_HEIGHT)
            );
            if options.include_labels {
                if let Some(label) = &node.label {
                    let _ = write!(
                        &mut out,
                        r#"<text class="person-label" x="{}" y="{}">{}</text>"#,
                        fmt(node.x),
                        fmt(node.y),
                        escape_xml(label)
                    );
                }
            }
            if linked {
                out.push_str("</a>");
            }
        } else {
            let _ = write!(
                &mut out,
                r#"<circle class="anchor-dot" cx="{}" cy="{}" r="{}" />"#,
                fmt(node.x),
                fmt(node.y),
                fmt(ANCHOR_RADIUS)
            );
        }
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}

/// Replays the row scene's draw calls. The scene carries its own margin, so
/// the viewBox is the scene size as-is.
pub fn render_rows_svg(layout: &RowsLayout, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        fmt(layout.width.max(1.0)),
        fmt(layout.height.max(1.0))
    );
    out.push_str(SVG_STYLE);

    out.push_str(r#"<g class="scene">"#);
    for primitive in &layout.primitives {
        match primitive {
            ScenePrimitive::Rect {
                x,
                y,
                width,
                height,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<rect class="row-box" x="{}" y="{}" width="{}" height="{}" />"#,
                    fmt(*x),
                    fmt(*y),
                    fmt(*width),
                    fmt(*height)
                );
            }
            ScenePrimitive::Line { x1, y1, x2, y2 } => {
                if !options.include_edges {
                    continue;
                }
                let _ = write!(
                    &mut out,
                    r#"<line class="row-line" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                    fmt(*x1),
                    fmt(*y1),
                    fmt(*x2),
                    fmt(*y2)
                );
            }
            ScenePrimitive::Text { x, y, text } => {
                if !options.include_labels {
                    continue;
                }
                let _ = write!(
                    &mut out,
                    r#"<text class="row-label" x="{}" y="{}">{}</text>"#,
                    fmt(*x),
                    fmt(*y),
                    escape_xml(text)
                );
            }
        }
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}

fn node_half_extent(id: NodeId) -> (f64, f64) {
    if id.role() == NodeRole::Person {
        (NODE_BOX_WIDTH / 2.0, NODE_BOX_HEIGHT / 2.0)
    } else {
        (ANCHOR_RADIUS, ANCHOR_RADIUS)
    }
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` or tiny float noise from our
    // own arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
