use super::view::ViewTransform;

/// Paint role of a shape. Surfaces map roles to theme colors; the reconciler
/// never deals in colors so shape diffs stay purely geometric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    NodeBox,
    Capsule,
    Header,
    Frame,
    Wedge,
    Stripe,
    Connector,
    Label,
    Title,
    ErrorBox,
    ErrorText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// A drawing primitive, in node-local coordinates. The owning group's
/// translate places it on the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        role: ShapeRole,
    },
    /// Rounded rectangle with corner radius = height / 2.
    Capsule {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        role: ShapeRole,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        role: ShapeRole,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        role: ShapeRole,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        anchor: TextAnchor,
        role: ShapeRole,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionChange {
    /// Apply without transition (initial placement, active drag).
    Immediate,
    /// Animate toward the new position; a newer change supersedes an
    /// in-flight one for the same group.
    Animated,
}

/// The retained drawing surface this crate renders against. One group per
/// geometry node, nested to mirror the tree; removing a group removes its
/// descendants.
pub trait Surface {
    fn create_group(&mut self, id: &str, parent: Option<&str>);
    fn set_shapes(&mut self, id: &str, shapes: &[Shape]);
    fn set_position(&mut self, id: &str, x: f32, y: f32, change: PositionChange);
    fn set_visible(&mut self, id: &str, visible: bool, fade: bool);
    fn remove_group(&mut self, id: &str, fade: bool);
    fn set_root_transform(&mut self, transform: ViewTransform);
}
