//! Node-local shape lists for every geometry node kind. Shared between the
//! static SVG renderer and the scene reconciler so both draw the same thing.

use crate::config::LayoutConfig;
use crate::layout::{GeometryNode, NodeDetail};

use super::surface::{Shape, ShapeRole, TextAnchor};

/// Shapes for `node`, in paint order, relative to the node's origin.
/// Sequences are invisible containers and produce nothing.
pub fn node_shapes(node: &GeometryNode, config: &LayoutConfig) -> Vec<Shape> {
    match &node.detail {
        NodeDetail::Sequence => Vec::new(),
        NodeDetail::Command { label } => vec![
            Shape::Rect {
                x: 0.0,
                y: 0.0,
                width: node.width,
                height: node.height,
                role: ShapeRole::NodeBox,
            },
            Shape::Text {
                x: node.width / 2.0,
                y: node.height / 2.0,
                content: label.clone(),
                anchor: TextAnchor::Middle,
                role: ShapeRole::Label,
            },
        ],
        NodeDetail::Error { message } => vec![
            Shape::Rect {
                x: 0.0,
                y: 0.0,
                width: node.width,
                height: node.height,
                role: ShapeRole::ErrorBox,
            },
            Shape::Text {
                x: node.width / 2.0,
                y: node.height / 2.0,
                content: message.clone(),
                anchor: TextAnchor::Middle,
                role: ShapeRole::ErrorText,
            },
        ],
        NodeDetail::Block(detail) => {
            let start_x = detail.line_x - detail.start_capsule_width / 2.0;
            let end_x = detail.line_x - detail.end_capsule_width / 2.0;
            vec![
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: node.width,
                    height: node.height,
                    role: ShapeRole::Frame,
                },
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: node.width,
                    height: config.header_height,
                    role: ShapeRole::Header,
                },
                Shape::Text {
                    x: config.header_text_inset,
                    y: config.header_height / 2.0,
                    content: detail.label.clone(),
                    anchor: TextAnchor::Start,
                    role: ShapeRole::Title,
                },
                Shape::Line {
                    x1: detail.line_x,
                    y1: detail.start_capsule_y + detail.capsule_height,
                    x2: detail.line_x,
                    y2: detail.end_capsule_y,
                    role: ShapeRole::Connector,
                },
                Shape::Capsule {
                    x: start_x,
                    y: detail.start_capsule_y,
                    width: detail.start_capsule_width,
                    height: detail.capsule_height,
                    role: ShapeRole::Capsule,
                },
                Shape::Text {
                    x: detail.line_x,
                    y: detail.start_capsule_y + detail.capsule_height / 2.0,
                    content: detail.label.clone(),
                    anchor: TextAnchor::Middle,
                    role: ShapeRole::Label,
                },
                Shape::Capsule {
                    x: end_x,
                    y: detail.end_capsule_y,
                    width: detail.end_capsule_width,
                    height: detail.capsule_height,
                    role: ShapeRole::Capsule,
                },
            ]
        }
        NodeDetail::If(detail) => {
            let [top_left, top_right, _notch, bottom_right, _bottom_left] = detail.wedge;
            let mut shapes = vec![
                Shape::Polygon {
                    points: detail.wedge.to_vec(),
                    role: ShapeRole::Wedge,
                },
                Shape::Text {
                    x: top_right.0 / 2.0,
                    y: (top_left.1 + bottom_right.1) / 2.0,
                    content: detail.condition.clone(),
                    anchor: TextAnchor::Middle,
                    role: ShapeRole::Label,
                },
                Shape::Line {
                    x1: top_right.0,
                    y1: top_right.1,
                    x2: detail.label_width,
                    y2: top_right.1,
                    role: ShapeRole::Connector,
                },
            ];
            if node.children.len() > 1 {
                shapes.push(Shape::Line {
                    x1: bottom_right.0,
                    y1: bottom_right.1,
                    x2: detail.label_width,
                    y2: bottom_right.1,
                    role: ShapeRole::Connector,
                });
            }
            shapes
        }
        NodeDetail::Loop(detail) => {
            let body_center_y = node
                .children
                .first()
                .map_or(node.height / 2.0, |body| body.y + body.height / 2.0);
            vec![
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: detail.stripe_width,
                    height: node.height,
                    role: ShapeRole::Stripe,
                },
                // The doubled left edge marking iteration.
                Shape::Line {
                    x1: config.loop_stripe_inset,
                    y1: 0.0,
                    x2: config.loop_stripe_inset,
                    y2: node.height,
                    role: ShapeRole::Connector,
                },
                Shape::Text {
                    x: (config.loop_stripe_inset + detail.stripe_width) / 2.0,
                    y: node.height / 2.0,
                    content: detail.condition.clone(),
                    anchor: TextAnchor::Middle,
                    role: ShapeRole::Label,
                },
                Shape::Line {
                    x1: detail.stripe_width,
                    y1: body_center_y,
                    x2: detail.stripe_width + config.gap_x,
                    y2: body_center_y,
                    role: ShapeRole::Connector,
                },
            ]
        }
    }
}
