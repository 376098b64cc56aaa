use serde::Serialize;

use crate::ast::ControlFlowNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Sequence,
    Block,
    If,
    Loop,
    Command,
    Error,
}

impl NodeKind {
    pub fn of(node: &ControlFlowNode) -> Self {
        match node {
            ControlFlowNode::Sequence { .. } => Self::Sequence,
            ControlFlowNode::Block { .. } => Self::Block,
            ControlFlowNode::If { .. } => Self::If,
            ControlFlowNode::Loop { .. } => Self::Loop,
            ControlFlowNode::Command { .. } => Self::Command,
            ControlFlowNode::Error { .. } => Self::Error,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Sequence => "seq",
            Self::Block => "block",
            Self::If => "if",
            Self::Loop => "loop",
            Self::Command => "cmd",
            Self::Error => "err",
        }
    }
}

/// Identity of the tree root.
pub fn root_identity(kind: NodeKind) -> String {
    kind.token().to_string()
}

/// Identity of a child, derived from the parent's path. Slots are positional
/// for sequence and block children; a then branch and a loop body are slot 0,
/// an else branch is slot 1, so dropping an else never renumbers the then
/// branch.
pub fn child_identity(parent: &str, kind: NodeKind, slot: usize) -> String {
    format!("{parent}/{}{slot}", kind.token())
}

/// One node of the geometry tree. `x`/`y` are relative to the parent node's
/// origin; the root sits at (0, 0).
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryNode {
    pub identity: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub detail: NodeDetail,
    pub children: Vec<GeometryNode>,
}

impl GeometryNode {
    pub fn kind(&self) -> NodeKind {
        match self.detail {
            NodeDetail::Sequence => NodeKind::Sequence,
            NodeDetail::Block(_) => NodeKind::Block,
            NodeDetail::If(_) => NodeKind::If,
            NodeDetail::Loop(_) => NodeKind::Loop,
            NodeDetail::Command { .. } => NodeKind::Command,
            NodeDetail::Error { .. } => NodeKind::Error,
        }
    }

    /// Depth-first walk over the tree, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a GeometryNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Per-kind auxiliary geometry produced by layout and consumed by rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDetail {
    Sequence,
    Block(BlockDetail),
    If(IfDetail),
    Loop(LoopDetail),
    Command { label: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockDetail {
    pub label: String,
    pub start_capsule_width: f32,
    pub end_capsule_width: f32,
    pub capsule_height: f32,
    /// X of the vertical connector line, relative to the node origin.
    pub line_x: f32,
    pub start_capsule_y: f32,
    pub end_capsule_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfDetail {
    pub condition: String,
    /// Width of the condition label area; branches start here.
    pub label_width: f32,
    /// Wedge vertices relative to the node origin, in winding order.
    pub wedge: [(f32, f32); 5],
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopDetail {
    pub condition: String,
    pub stripe_width: f32,
}
