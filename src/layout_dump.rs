use crate::layout::{GeometryNode, NodeDetail};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
}

/// One geometry node flattened for inspection. Coordinates are absolute
/// within the diagram, unlike the within-parent coordinates of the tree.
#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub identity: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(root: &GeometryNode) -> Self {
        let mut nodes = Vec::new();
        flatten(root, 0.0, 0.0, &mut nodes);
        LayoutDump {
            width: root.width,
            height: root.height,
            nodes,
        }
    }
}

fn flatten(node: &GeometryNode, origin_x: f32, origin_y: f32, out: &mut Vec<NodeDump>) {
    let x = origin_x + node.x;
    let y = origin_y + node.y;
    let text = match &node.detail {
        NodeDetail::Sequence => None,
        NodeDetail::Block(detail) => Some(detail.label.clone()),
        NodeDetail::If(detail) => Some(detail.condition.clone()),
        NodeDetail::Loop(detail) => Some(detail.condition.clone()),
        NodeDetail::Command { label } => Some(label.clone()),
        NodeDetail::Error { message } => Some(message.clone()),
    };
    out.push(NodeDump {
        identity: node.identity.clone(),
        kind: node.kind().token().to_string(),
        x,
        y,
        width: node.width,
        height: node.height,
        text,
    });
    for child in &node.children {
        flatten(child, x, y, out);
    }
}

pub fn write_layout_dump(path: &Path, root: &GeometryNode) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(root);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ControlFlowNode;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::text_metrics::CharMetrics;

    #[test]
    fn dump_flattens_with_absolute_coordinates() {
        let tree = ControlFlowNode::Loop {
            condition: "i < 3".to_string(),
            body: Box::new(ControlFlowNode::Command {
                label: "step()".to_string(),
            }),
        };
        let config = LayoutConfig::default();
        let root = compute_layout(&tree, &CharMetrics::default(), &config);
        let dump = LayoutDump::from_layout(&root);
        assert_eq!(dump.nodes.len(), 2);
        assert_eq!(dump.nodes[0].kind, "loop");
        let body = &dump.nodes[1];
        assert_eq!(body.kind, "cmd");
        // Body x is absolute: stripe width + gap.
        assert_eq!(body.x, root.children[0].x);
        assert_eq!(body.text.as_deref(), Some("step()"));
    }
}
