//! Fixed-shape calculators for the PAD primitives: capsules, the function
//! header bar, the container frame, and the conditional wedge polygon. All
//! pure arithmetic over [`LayoutConfig`] constants.

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleGeom {
    pub width: f32,
    pub height: f32,
}

impl CapsuleGeom {
    /// Attachment point for the connector arriving from above.
    pub fn top_anchor(&self) -> (f32, f32) {
        (self.width / 2.0, 0.0)
    }

    /// Attachment point for the connector leaving below.
    pub fn bottom_anchor(&self) -> (f32, f32) {
        (self.width / 2.0, self.height)
    }
}

/// Start marker of a function body. Width grows with the label.
pub fn start_capsule(label_width: f32, config: &LayoutConfig) -> CapsuleGeom {
    let width = (label_width + 2.0 * config.capsule_text_padding).max(config.capsule_min_width);
    CapsuleGeom {
        width,
        height: config.capsule_height,
    }
}

/// End marker. Fixed size.
pub fn end_capsule(config: &LayoutConfig) -> CapsuleGeom {
    CapsuleGeom {
        width: config.capsule_min_width,
        height: config.capsule_height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderGeom {
    pub width: f32,
    pub height: f32,
    /// Left-aligned text anchor.
    pub text_x: f32,
    pub text_y: f32,
}

pub fn header_bar(width: f32, config: &LayoutConfig) -> HeaderGeom {
    HeaderGeom {
        width,
        height: config.header_height,
        text_x: config.header_text_inset,
        text_y: config.header_height / 2.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeom {
    pub width: f32,
    pub height: f32,
    pub header: Rect,
    pub body: Rect,
    pub title: (f32, f32),
}

/// Frame around a function container: the inner content plus padding on every
/// side and the header bar on top.
pub fn container_frame(inner_width: f32, inner_height: f32, config: &LayoutConfig) -> FrameGeom {
    let width = inner_width + 2.0 * config.container_padding;
    let height = config.header_height + inner_height + 2.0 * config.container_padding;
    FrameGeom {
        width,
        height,
        header: Rect {
            x: 0.0,
            y: 0.0,
            width,
            height: config.header_height,
        },
        body: Rect {
            x: config.container_padding,
            y: config.header_height + config.container_padding,
            width: inner_width,
            height: inner_height,
        },
        title: (config.header_text_inset, config.header_height / 2.0),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WedgeArgs {
    /// Height of the already-laid-out then branch.
    pub then_height: f32,
    /// X at which the branch boxes start.
    pub child_x: f32,
    /// Vertical center of the else branch, when one exists.
    pub else_center_y: Option<f32>,
    /// Height of the conditional node the wedge lives in.
    pub container_height: f32,
}

/// The five-vertex concave wedge of a conditional, in winding order:
/// top-left, top-right, notch, bottom-right, bottom-left. The notch indents
/// the right edge so the shape reads as a pointer toward the branches.
pub fn wedge(args: &WedgeArgs, config: &LayoutConfig) -> [(f32, f32); 5] {
    let top_y = args.then_height / 2.0;
    let bottom_y = match args.else_center_y {
        Some(center) => center,
        None => {
            (top_y + config.min_wedge_height).max(args.container_height - config.bottom_padding)
        }
    };
    let right_x = args.child_x - config.wedge_child_gap;
    [
        (0.0, top_y),
        (right_x, top_y),
        (right_x - config.notch_depth, (top_y + bottom_y) / 2.0),
        (right_x, bottom_y),
        (0.0, bottom_y),
    ]
}
