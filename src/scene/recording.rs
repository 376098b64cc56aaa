//! A headless [`Surface`] that records every operation it receives. Used by
//! the reconciler tests and handy for debugging a host integration.

use super::surface::{PositionChange, Shape, Surface};
use super::view::ViewTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    CreateGroup {
        id: String,
        parent: Option<String>,
    },
    SetShapes {
        id: String,
        shapes: Vec<Shape>,
    },
    SetPosition {
        id: String,
        x: f32,
        y: f32,
        change: PositionChange,
    },
    SetVisible {
        id: String,
        visible: bool,
        fade: bool,
    },
    RemoveGroup {
        id: String,
        fade: bool,
    },
    SetRootTransform(ViewTransform),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops_for<'a>(&'a self, id: &str) -> Vec<&'a SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| match op {
                SurfaceOp::CreateGroup { id: op_id, .. }
                | SurfaceOp::SetShapes { id: op_id, .. }
                | SurfaceOp::SetPosition { id: op_id, .. }
                | SurfaceOp::SetVisible { id: op_id, .. }
                | SurfaceOp::RemoveGroup { id: op_id, .. } => op_id == id,
                SurfaceOp::SetRootTransform(_) => false,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn create_group(&mut self, id: &str, parent: Option<&str>) {
        self.ops.push(SurfaceOp::CreateGroup {
            id: id.to_string(),
            parent: parent.map(str::to_string),
        });
    }

    fn set_shapes(&mut self, id: &str, shapes: &[Shape]) {
        self.ops.push(SurfaceOp::SetShapes {
            id: id.to_string(),
            shapes: shapes.to_vec(),
        });
    }

    fn set_position(&mut self, id: &str, x: f32, y: f32, change: PositionChange) {
        self.ops.push(SurfaceOp::SetPosition {
            id: id.to_string(),
            x,
            y,
            change,
        });
    }

    fn set_visible(&mut self, id: &str, visible: bool, fade: bool) {
        self.ops.push(SurfaceOp::SetVisible {
            id: id.to_string(),
            visible,
            fade,
        });
    }

    fn remove_group(&mut self, id: &str, fade: bool) {
        self.ops.push(SurfaceOp::RemoveGroup {
            id: id.to_string(),
            fade,
        });
    }

    fn set_root_transform(&mut self, transform: ViewTransform) {
        self.ops.push(SurfaceOp::SetRootTransform(transform));
    }
}
