use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::GeometryNode;
use crate::scene::shapes::node_shapes;
use crate::scene::{Shape, ShapeRole, TextAnchor};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const RENDER_MARGIN: f32 = 20.0;

/// Renders a geometry tree as a static SVG document. Each node becomes a
/// translated group, nesting mirrors the tree.
pub fn render_svg(root: &GeometryNode, theme: &Theme, config: &LayoutConfig) -> String {
    let width = root.width + 2.0 * RENDER_MARGIN;
    let height = root.height + 2.0 * RENDER_MARGIN;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({RENDER_MARGIN:.2},{RENDER_MARGIN:.2})\">"
    ));
    render_node(root, theme, config, &mut svg);
    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

fn render_node(node: &GeometryNode, theme: &Theme, config: &LayoutConfig, svg: &mut String) {
    svg.push_str(&format!(
        "<g transform=\"translate({:.2},{:.2})\">",
        node.x, node.y
    ));
    for shape in node_shapes(node, config) {
        push_shape(&shape, theme, config, svg);
    }
    for child in &node.children {
        render_node(child, theme, config, svg);
    }
    svg.push_str("</g>");
}

fn push_shape(shape: &Shape, theme: &Theme, config: &LayoutConfig, svg: &mut String) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            role,
        } => {
            let (fill, stroke) = paint(*role, theme);
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.4\"/>",
            ));
        }
        Shape::Capsule {
            x,
            y,
            width,
            height,
            role,
        } => {
            let (fill, stroke) = paint(*role, theme);
            let radius = height / 2.0;
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.4\"/>",
            ));
        }
        Shape::Polygon { points, role } => {
            let (fill, stroke) = paint(*role, theme);
            let mut path = String::new();
            for (idx, (x, y)) in points.iter().enumerate() {
                let prefix = if idx == 0 { "" } else { " " };
                path.push_str(&format!("{prefix}{x:.2},{y:.2}"));
            }
            svg.push_str(&format!(
                "<polygon points=\"{path}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.4\"/>",
            ));
        }
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            role,
        } => {
            let (_, stroke) = paint(*role, theme);
            svg.push_str(&format!(
                "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{stroke}\" stroke-width=\"1.4\"/>",
            ));
        }
        Shape::Text {
            x,
            y,
            content,
            anchor,
            role,
        } => {
            let (fill, _) = paint(*role, theme);
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
            };
            svg.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{fill}\">{}</text>",
                theme.font_family,
                config.font_size,
                escape_xml(content)
            ));
        }
    }
}

fn paint(role: ShapeRole, theme: &Theme) -> (&str, &str) {
    match role {
        ShapeRole::NodeBox => (theme.node_fill.as_str(), theme.node_border.as_str()),
        ShapeRole::Capsule => (theme.capsule_fill.as_str(), theme.node_border.as_str()),
        ShapeRole::Header => (theme.header_fill.as_str(), theme.frame_border.as_str()),
        ShapeRole::Frame => ("none", theme.frame_border.as_str()),
        ShapeRole::Wedge => (theme.wedge_fill.as_str(), theme.node_border.as_str()),
        ShapeRole::Stripe => (theme.stripe_fill.as_str(), theme.node_border.as_str()),
        ShapeRole::Connector => ("none", theme.line_color.as_str()),
        ShapeRole::Label => (theme.text_color.as_str(), "none"),
        ShapeRole::Title => (theme.header_text_color.as_str(), "none"),
        ShapeRole::ErrorBox => (theme.error_fill.as_str(), theme.error_border.as_str()),
        ShapeRole::ErrorText => (theme.error_text_color.as_str(), "none"),
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .unwrap_or("monospace")
        .trim()
        .to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}
