use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::layout::GeometryNode;

use super::shapes::node_shapes;
use super::surface::{PositionChange, Shape, Surface};
use super::view::{MemoryViewState, ViewStateHost, ViewTransform};

#[derive(Debug)]
struct RenderedNode {
    parent: Option<String>,
    base_x: f32,
    base_y: f32,
    shapes: Vec<Shape>,
}

#[derive(Debug)]
struct DragState {
    identity: String,
}

/// Keeps the drawing surface in sync with successive geometry trees using
/// identity-keyed enter/update/exit diffing, and owns the interactive state
/// that must survive recomputation: per-node manual offsets and the view
/// transform.
pub struct SceneReconciler {
    rendered: HashMap<String, RenderedNode>,
    offsets: HashMap<String, (f32, f32)>,
    view: ViewTransform,
    drag: Option<DragState>,
    host: Box<dyn ViewStateHost>,
}

impl SceneReconciler {
    pub fn new(mut host: Box<dyn ViewStateHost>) -> Self {
        let view = host.load().map(ViewTransform::clamped).unwrap_or_default();
        Self {
            rendered: HashMap::new(),
            offsets: HashMap::new(),
            view,
            drag: None,
            host,
        }
    }

    pub fn with_memory_state() -> Self {
        Self::new(Box::new(MemoryViewState::new()))
    }

    /// Reconciles the surface against a freshly computed geometry tree. Safe
    /// to call repeatedly with structurally different trees; only changed
    /// attributes are patched.
    pub fn render(&mut self, root: &GeometryNode, config: &LayoutConfig, surface: &mut dyn Surface) {
        surface.set_root_transform(self.view);
        let mut visited = HashSet::new();
        self.render_level(
            std::slice::from_ref(root),
            None,
            config,
            surface,
            &mut visited,
        );
    }

    fn render_level(
        &mut self,
        nodes: &[GeometryNode],
        parent: Option<&str>,
        config: &LayoutConfig,
        surface: &mut dyn Surface,
        visited: &mut HashSet<String>,
    ) {
        let new_ids: HashSet<&str> = nodes.iter().map(|node| node.identity.as_str()).collect();

        // Exit: previously rendered at this level, gone now.
        let stale: Vec<String> = self
            .rendered
            .iter()
            .filter(|(id, entry)| {
                entry.parent.as_deref() == parent && !new_ids.contains(id.as_str())
            })
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            surface.remove_group(&id, true);
            self.forget_subtree(&id);
        }

        // Enter/update, preserving sibling order.
        for node in nodes {
            debug_assert!(
                visited.insert(node.identity.clone()),
                "identity collision: {}",
                node.identity
            );
            let offset = self
                .offsets
                .get(&node.identity)
                .copied()
                .unwrap_or((0.0, 0.0));
            let x = node.x + offset.0;
            let y = node.y + offset.1;
            let shapes = node_shapes(node, config);
            let dragging = self.is_dragging(&node.identity);

            match self.rendered.get_mut(&node.identity) {
                None => {
                    surface.create_group(&node.identity, parent);
                    surface.set_visible(&node.identity, false, false);
                    surface.set_shapes(&node.identity, &shapes);
                    surface.set_position(&node.identity, x, y, PositionChange::Immediate);
                    surface.set_visible(&node.identity, true, true);
                    self.rendered.insert(
                        node.identity.clone(),
                        RenderedNode {
                            parent: parent.map(str::to_string),
                            base_x: node.x,
                            base_y: node.y,
                            shapes,
                        },
                    );
                }
                Some(entry) => {
                    if entry.shapes != shapes {
                        surface.set_shapes(&node.identity, &shapes);
                        entry.shapes = shapes;
                    }
                    if entry.base_x != node.x || entry.base_y != node.y {
                        let change = if dragging {
                            PositionChange::Immediate
                        } else {
                            PositionChange::Animated
                        };
                        surface.set_position(&node.identity, x, y, change);
                        entry.base_x = node.x;
                        entry.base_y = node.y;
                    }
                }
            }
        }

        // Recurse after this level is fully reconciled.
        for node in nodes {
            self.render_level(&node.children, Some(&node.identity), config, surface, visited);
        }
    }

    fn forget_subtree(&mut self, id: &str) {
        let children: Vec<String> = self
            .rendered
            .iter()
            .filter(|(_, entry)| entry.parent.as_deref() == Some(id))
            .map(|(child, _)| child.clone())
            .collect();
        for child in children {
            self.forget_subtree(&child);
        }
        self.rendered.remove(id);
        self.offsets.remove(id);
    }

    /// Marks `identity` as under drag, suspending its animated transitions
    /// and the ambient pan/zoom gesture. Returns false for unknown nodes.
    pub fn begin_drag(&mut self, identity: &str) -> bool {
        if !self.rendered.contains_key(identity) {
            return false;
        }
        self.drag = Some(DragState {
            identity: identity.to_string(),
        });
        true
    }

    /// Accumulates a pointer delta into the dragged node's manual offset.
    /// Deltas are in screen pixels and divided by the view scale so dragging
    /// stays 1:1 at any zoom level.
    pub fn drag_by(&mut self, dx: f32, dy: f32, surface: &mut dyn Surface) {
        let Some(drag) = &self.drag else {
            return;
        };
        let Some(entry) = self.rendered.get(&drag.identity) else {
            return;
        };
        let scale = self.view.scale;
        let offset = self.offsets.entry(drag.identity.clone()).or_insert((0.0, 0.0));
        offset.0 += dx / scale;
        offset.1 += dy / scale;
        surface.set_position(
            &drag.identity,
            entry.base_x + offset.0,
            entry.base_y + offset.1,
            PositionChange::Immediate,
        );
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// True while a drag is active; the host must not feed pan/zoom gestures
    /// in this state.
    pub fn pan_suspended(&self) -> bool {
        self.drag.is_some()
    }

    fn is_dragging(&self, identity: &str) -> bool {
        self.drag
            .as_ref()
            .is_some_and(|drag| drag.identity == identity)
    }

    pub fn manual_offset(&self, identity: &str) -> (f32, f32) {
        self.offsets.get(identity).copied().unwrap_or((0.0, 0.0))
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn set_view(&mut self, view: ViewTransform, surface: &mut dyn Surface) {
        self.view = view.clamped();
        surface.set_root_transform(self.view);
        self.host.save(&self.view);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32, surface: &mut dyn Surface) {
        if self.pan_suspended() {
            return;
        }
        self.view = self.view.panned_by(dx, dy);
        surface.set_root_transform(self.view);
        self.host.save(&self.view);
    }

    pub fn zoom_by(&mut self, factor: f32, cx: f32, cy: f32, surface: &mut dyn Surface) {
        if self.pan_suspended() {
            return;
        }
        self.view = self.view.zoomed_about(factor, cx, cy);
        surface.set_root_transform(self.view);
        self.host.save(&self.view);
    }
}
