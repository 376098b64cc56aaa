//! Recursive layout of a control-flow tree into absolute geometry. Children
//! are measured bottom-up; every node receives a path-derived stable identity
//! the scene reconciler keys on.

pub(crate) mod types;
pub use types::*;

use crate::ast::ControlFlowNode;
use crate::config::LayoutConfig;
use crate::geometry::{self, WedgeArgs};
use crate::text_metrics::TextMeasure;

/// Lays out `root` and returns the geometry tree. Total: every well-formed
/// input, including `Error` nodes, produces a result.
pub fn compute_layout(
    root: &ControlFlowNode,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let identity = root_identity(NodeKind::of(root));
    layout_node(root, identity, metrics, config)
}

fn layout_node(
    node: &ControlFlowNode,
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    match node {
        ControlFlowNode::Sequence { children } => {
            layout_sequence(children, identity, metrics, config)
        }
        ControlFlowNode::Block { label, children } => {
            layout_block(label, children, identity, metrics, config)
        }
        ControlFlowNode::If {
            condition,
            then_block,
            else_block,
        } => layout_conditional(
            condition,
            then_block,
            else_block.as_deref(),
            identity,
            metrics,
            config,
        ),
        ControlFlowNode::Loop { condition, body } => {
            layout_loop(condition, body, identity, metrics, config)
        }
        ControlFlowNode::Command { label } => layout_command(label, identity, metrics, config),
        ControlFlowNode::Error { message } => layout_error(message, identity, config),
    }
}

/// Lays out `items` as a vertical stack with `margin_y` gaps. Returns the
/// children (positioned at x = 0 within the stack) plus the stack extent.
fn stack_children(
    items: &[ControlFlowNode],
    parent: &str,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> (Vec<GeometryNode>, f32, f32) {
    let mut children = Vec::with_capacity(items.len());
    let mut width = 0.0f32;
    let mut cursor = 0.0f32;
    for (slot, item) in items.iter().enumerate() {
        let identity = child_identity(parent, NodeKind::of(item), slot);
        let mut child = layout_node(item, identity, metrics, config);
        if slot > 0 {
            cursor += config.margin_y;
        }
        child.x = 0.0;
        child.y = cursor;
        cursor += child.height;
        width = width.max(child.width);
        children.push(child);
    }
    (children, width, cursor)
}

fn layout_sequence(
    items: &[ControlFlowNode],
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let (children, width, height) = stack_children(items, &identity, metrics, config);
    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width: width.max(config.min_width),
        height,
        detail: NodeDetail::Sequence,
        children,
    }
}

fn layout_block(
    label: &str,
    items: &[ControlFlowNode],
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let (mut children, stack_width, stack_height) =
        stack_children(items, &identity, metrics, config);

    let label_width = metrics.measure(label, config.font_size);
    let start = geometry::start_capsule(label_width, config);
    let end = geometry::end_capsule(config);

    // Everything in the body centers on the vertical connector line.
    let inner_width = start.width.max(stack_width);
    let line_x_body = inner_width / 2.0;

    let pad = config.container_padding;
    let header = config.header_height;
    let gap = config.margin_y;

    let stack_x = pad + line_x_body - stack_width / 2.0;
    let stack_y = header + pad + start.height + gap;
    for child in &mut children {
        child.x += stack_x;
        child.y += stack_y;
    }

    let end_capsule_y = stack_y + stack_height + gap;
    let frame = geometry::container_frame(
        inner_width,
        start.height + gap + stack_height + gap + end.height,
        config,
    );

    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width: frame.width,
        height: frame.height,
        detail: NodeDetail::Block(BlockDetail {
            label: label.to_string(),
            start_capsule_width: start.width,
            end_capsule_width: end.width,
            capsule_height: start.height,
            line_x: pad + line_x_body,
            start_capsule_y: header + pad,
            end_capsule_y,
        }),
        children,
    }
}

fn layout_command(
    label: &str,
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let text_width = metrics.measure(label, config.font_size);
    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width: (text_width + 2.0 * config.text_padding).max(config.min_width),
        height: config.min_height,
        detail: NodeDetail::Command {
            label: label.to_string(),
        },
        children: Vec::new(),
    }
}

fn layout_conditional(
    condition: &str,
    then_block: &ControlFlowNode,
    else_block: Option<&ControlFlowNode>,
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let then_identity = child_identity(&identity, NodeKind::of(then_block), 0);
    let mut then_node = layout_node(then_block, then_identity, metrics, config);
    let mut else_node = else_block.map(|node| {
        let else_identity = child_identity(&identity, NodeKind::of(node), 1);
        layout_node(node, else_identity, metrics, config)
    });

    let label_width = metrics
        .measure(condition, config.font_size)
        .max(config.cond_label_min_width)
        + config.cond_label_padding;

    then_node.x = label_width;
    then_node.y = 0.0;
    let then_height = then_node.height;

    let mut else_center_y = None;
    if let Some(else_node) = else_node.as_mut() {
        let half = else_node.height / 2.0;
        let center = (then_height + config.branch_gap + half)
            .max(then_height / 2.0 + config.min_wedge_height);
        else_node.x = label_width;
        else_node.y = center - half;
        else_center_y = Some(center);
    }

    let branch_width = else_node
        .as_ref()
        .map_or(then_node.width, |node| then_node.width.max(node.width));
    let width = label_width + branch_width + config.trailing_padding;
    let bottom_extent = else_node.as_ref().map_or_else(
        || then_height.max(then_height / 2.0 + config.min_wedge_height),
        |node| node.y + node.height,
    );
    let height = bottom_extent + config.bottom_padding;

    let wedge = geometry::wedge(
        &WedgeArgs {
            then_height,
            child_x: label_width,
            else_center_y,
            container_height: height,
        },
        config,
    );

    let mut children = vec![then_node];
    if let Some(else_node) = else_node {
        children.push(else_node);
    }

    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width,
        height,
        detail: NodeDetail::If(IfDetail {
            condition: condition.to_string(),
            label_width,
            wedge,
        }),
        children,
    }
}

fn layout_loop(
    condition: &str,
    body: &ControlFlowNode,
    identity: String,
    metrics: &dyn TextMeasure,
    config: &LayoutConfig,
) -> GeometryNode {
    let body_identity = child_identity(&identity, NodeKind::of(body), 0);
    let mut body_node = layout_node(body, body_identity, metrics, config);

    let text_width = metrics.measure(condition, config.font_size);
    let stripe_width = (text_width + 2.0 * config.loop_stripe_inset + 2.0 * config.text_padding)
        .max(config.min_width);

    body_node.x = stripe_width + config.gap_x;
    body_node.y = 0.0;

    let width = stripe_width + config.gap_x + body_node.width;
    let height = body_node.height.max(config.min_height);

    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width,
        height,
        detail: NodeDetail::Loop(LoopDetail {
            condition: condition.to_string(),
            stripe_width,
        }),
        children: vec![body_node],
    }
}

fn layout_error(message: &str, identity: String, config: &LayoutConfig) -> GeometryNode {
    GeometryNode {
        identity,
        x: 0.0,
        y: 0.0,
        width: config.min_width,
        height: config.min_height,
        detail: NodeDetail::Error {
            message: message.to_string(),
        },
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::CharMetrics;
    use std::collections::HashSet;

    fn cmd(label: &str) -> ControlFlowNode {
        ControlFlowNode::Command {
            label: label.to_string(),
        }
    }

    fn seq(children: Vec<ControlFlowNode>) -> ControlFlowNode {
        ControlFlowNode::Sequence { children }
    }

    fn cond(condition: &str, then: ControlFlowNode, alt: Option<ControlFlowNode>) -> ControlFlowNode {
        ControlFlowNode::If {
            condition: condition.to_string(),
            then_block: Box::new(then),
            else_block: alt.map(Box::new),
        }
    }

    fn layout(node: &ControlFlowNode) -> GeometryNode {
        compute_layout(node, &CharMetrics::default(), &LayoutConfig::default())
    }

    #[test]
    fn command_floors_at_min_size() {
        let node = layout(&cmd(""));
        assert_eq!(node.width, 100.0);
        assert_eq!(node.height, 40.0);
    }

    #[test]
    fn command_grows_with_label() {
        let metrics = CharMetrics::new(1.0);
        let config = LayoutConfig::default();
        let node = compute_layout(&cmd("a_rather_long_statement();"), &metrics, &config);
        let expected = 26.0 * config.font_size + 2.0 * config.text_padding;
        assert_eq!(node.width, expected);
    }

    #[test]
    fn sequence_heights_are_additive() {
        let node = layout(&seq(vec![cmd("a"), cmd("b"), cmd("c")]));
        assert_eq!(node.height, 40.0 + 20.0 + 40.0 + 20.0 + 40.0);
        assert_eq!(node.children[0].y, 0.0);
        assert_eq!(node.children[1].y, 60.0);
        assert_eq!(node.children[2].y, 120.0);
        assert_eq!(node.width, 100.0);
    }

    #[test]
    fn empty_sequence_has_zero_height() {
        let node = layout(&seq(Vec::new()));
        assert_eq!(node.height, 0.0);
        assert_eq!(node.width, 100.0);
    }

    #[test]
    fn sequence_width_is_max_child_width() {
        let metrics = CharMetrics::new(1.0);
        let config = LayoutConfig::default();
        let node = compute_layout(
            &seq(vec![cmd("x"), cmd("a_much_longer_label_here")]),
            &metrics,
            &config,
        );
        assert_eq!(node.width, node.children[1].width);
        assert!(node.children[1].width > node.children[0].width);
    }

    #[test]
    fn conditional_without_else_has_exact_height() {
        let node = layout(&cond("x > 0", cmd("a"), None));
        // max(40, 40/2 + 60) + 20
        assert_eq!(node.height, 100.0);
        // Independent of branch width.
        let wide = layout(&cond("x > 0", cmd("a_very_wide_command_label_xxxx"), None));
        assert_eq!(wide.height, 100.0);
    }

    #[test]
    fn conditional_without_else_tall_then_branch() {
        let tall = seq(vec![cmd("a"), cmd("b"), cmd("c"), cmd("d")]);
        let node = layout(&cond("x", tall, None));
        let then_height = node.children[0].height;
        assert_eq!(then_height, 220.0);
        assert_eq!(node.height, then_height + 20.0);
    }

    #[test]
    fn conditional_with_else_places_center_correctly() {
        let node = layout(&cond("x > 0", cmd("a"), Some(cmd("b"))));
        let else_node = &node.children[1];
        // max(40 + 40 + 20, 20 + 60) = 100
        assert_eq!(else_node.y + else_node.height / 2.0, 100.0);
        assert_eq!(else_node.y, 80.0);
    }

    #[test]
    fn conditional_with_else_keeps_branch_gap() {
        let config = LayoutConfig::default();
        let tall = seq(vec![cmd("a"), cmd("b"), cmd("c")]);
        let node = layout(&cond("x", tall.clone(), Some(tall)));
        let then_node = &node.children[0];
        let else_node = &node.children[1];
        let gap = else_node.y - (then_node.y + then_node.height);
        assert!(gap >= config.branch_gap);

        let NodeDetail::If(detail) = &node.detail else {
            panic!("expected if detail");
        };
        let wedge_extent = detail.wedge[3].1 - detail.wedge[1].1;
        assert!(wedge_extent >= config.min_wedge_height);
    }

    #[test]
    fn conditional_contains_its_branches() {
        let node = layout(&cond("x", seq(vec![cmd("a"), cmd("b")]), Some(cmd("c"))));
        for child in &node.children {
            assert!(child.x + child.width <= node.width);
            assert!(child.y + child.height <= node.height);
        }
    }

    #[test]
    fn loop_body_sits_right_of_stripe_by_gap_x() {
        let config = LayoutConfig::default();
        let node = layout(&ControlFlowNode::Loop {
            condition: "i < 3".to_string(),
            body: Box::new(cmd("i = i + 1")),
        });
        let NodeDetail::Loop(detail) = &node.detail else {
            panic!("expected loop detail");
        };
        assert_eq!(node.children[0].x, detail.stripe_width + config.gap_x);
        assert_eq!(node.width, detail.stripe_width + config.gap_x + node.children[0].width);
        assert_eq!(node.height, 40.0);
    }

    #[test]
    fn block_width_covers_capsule_and_padding() {
        let config = LayoutConfig::default();
        let node = layout(&ControlFlowNode::Block {
            label: "main".to_string(),
            children: vec![
                cmd("i = 0"),
                ControlFlowNode::Loop {
                    condition: "i < 3".to_string(),
                    body: Box::new(cmd("i = i + 1")),
                },
            ],
        });
        let NodeDetail::Block(detail) = &node.detail else {
            panic!("expected block detail");
        };
        assert!(node.width >= detail.start_capsule_width + 2.0 * config.container_padding);
        // header + pad + capsule + gap + (40 + 20 + 40) + gap + capsule + pad
        assert_eq!(node.height, 30.0 + 20.0 + 30.0 + 20.0 + 100.0 + 20.0 + 30.0 + 20.0);
        // The child stack shares one left edge and centers on the connector.
        let stack_x = node.children[0].x;
        let stack_width = node
            .children
            .iter()
            .map(|child| child.width)
            .fold(0.0f32, f32::max);
        assert!(node.children.iter().all(|child| child.x == stack_x));
        assert!((stack_x + stack_width / 2.0 - detail.line_x).abs() < 1e-3);
        for child in &node.children {
            assert!(child.x >= 0.0);
            assert!(child.x + child.width <= node.width);
        }
    }

    #[test]
    fn wide_sequence_stays_inside_block_frame() {
        let metrics = CharMetrics::new(1.0);
        let config = LayoutConfig::default();
        let node = compute_layout(
            &ControlFlowNode::Block {
                label: "f".to_string(),
                children: vec![cmd("a_statement_far_wider_than_the_start_capsule")],
            },
            &metrics,
            &config,
        );
        for child in &node.children {
            assert!(child.x >= config.container_padding - 1e-3);
            assert!(child.x + child.width <= node.width - config.container_padding + 1e-3);
        }
    }

    #[test]
    fn error_lays_out_as_placeholder() {
        let node = layout(&ControlFlowNode::Error {
            message: "Parse error: unexpected token".to_string(),
        });
        assert_eq!(node.width, 100.0);
        assert_eq!(node.height, 40.0);
        assert!(node.children.is_empty());
    }

    #[test]
    fn layout_is_deterministic() {
        let tree = ControlFlowNode::Block {
            label: "fn main()".to_string(),
            children: vec![seq(vec![
                cmd("let x = 1;"),
                cond("x > 0", cmd("a()"), Some(cmd("b()"))),
            ])],
        };
        assert_eq!(layout(&tree), layout(&tree));
    }

    #[test]
    fn identities_are_unique_and_path_derived() {
        let tree = seq(vec![
            cmd("same"),
            cmd("same"),
            cond("x", cmd("same"), Some(cmd("same"))),
        ]);
        let root = layout(&tree);
        let mut seen = HashSet::new();
        root.walk(&mut |node| {
            assert!(seen.insert(node.identity.clone()), "duplicate {}", node.identity);
        });
        assert_eq!(root.identity, "seq");
        assert_eq!(root.children[0].identity, "seq/cmd0");
        assert_eq!(root.children[2].identity, "seq/if2");
        assert_eq!(root.children[2].children[0].identity, "seq/if2/cmd0");
        assert_eq!(root.children[2].children[1].identity, "seq/if2/cmd1");
    }

    #[test]
    fn leaf_label_change_preserves_other_identities() {
        let before = seq(vec![cmd("a"), cmd("b"), cmd("c")]);
        let after = seq(vec![cmd("a"), cmd("RENAMED"), cmd("c")]);
        let old = layout(&before);
        let new = layout(&after);
        let collect = |root: &GeometryNode| {
            let mut ids = Vec::new();
            root.walk(&mut |node| ids.push(node.identity.clone()));
            ids
        };
        assert_eq!(collect(&old), collect(&new));
    }

    #[test]
    fn dropping_else_keeps_then_identity() {
        let with_else = cond("x", cmd("a"), Some(cmd("b")));
        let without = cond("x", cmd("a"), None);
        let old = layout(&with_else);
        let new = layout(&without);
        assert_eq!(old.children[0].identity, new.children[0].identity);
        assert_eq!(new.children.len(), 1);
    }

    #[test]
    fn sizing_floor_holds_for_boxed_nodes() {
        let config = LayoutConfig::default();
        let tree = ControlFlowNode::Block {
            label: "m".to_string(),
            children: vec![seq(vec![
                cmd(""),
                cond("", cmd(""), Some(cmd(""))),
                ControlFlowNode::Loop {
                    condition: "".to_string(),
                    body: Box::new(cmd("")),
                },
                ControlFlowNode::Error {
                    message: "".to_string(),
                },
            ])],
        };
        let root = layout(&tree);
        root.walk(&mut |node| {
            if node.kind() != NodeKind::Sequence {
                assert!(node.width >= config.min_width, "{} too narrow", node.identity);
                assert!(node.height >= config.min_height, "{} too short", node.identity);
            }
        });
    }
}
