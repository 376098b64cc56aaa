use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 4.0;

/// The single pan/zoom transform applied at the scene root, independent of
/// node geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn clamped(self) -> Self {
        Self {
            scale: self.scale.clamp(MIN_SCALE, MAX_SCALE),
            ..self
        }
    }

    pub fn panned_by(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Scales by `factor` keeping the screen point `(cx, cy)` fixed.
    pub fn zoomed_about(self, factor: f32, cx: f32, cy: f32) -> Self {
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = scale / self.scale;
        Self {
            x: cx - (cx - self.x) * applied,
            y: cy - (cy - self.y) * applied,
            scale,
        }
    }
}

/// Where the view transform is persisted between sessions. A browser host
/// backs this with the location fragment; the storage medium is the host's
/// concern.
pub trait ViewStateHost {
    fn load(&mut self) -> Option<ViewTransform>;
    fn save(&mut self, transform: &ViewTransform);
}

/// In-process host. Survives reconciler reconstruction, not the process.
#[derive(Debug, Default)]
pub struct MemoryViewState {
    stored: Option<ViewTransform>,
}

impl MemoryViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(transform: ViewTransform) -> Self {
        Self {
            stored: Some(transform),
        }
    }
}

impl ViewStateHost for MemoryViewState {
    fn load(&mut self) -> Option<ViewTransform> {
        self.stored
    }

    fn save(&mut self, transform: &ViewTransform) {
        self.stored = Some(*transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let view = ViewTransform::default();
        assert_eq!(view.zoomed_about(100.0, 0.0, 0.0).scale, MAX_SCALE);
        assert_eq!(view.zoomed_about(0.001, 0.0, 0.0).scale, MIN_SCALE);
    }

    #[test]
    fn zoom_keeps_anchor_point_fixed() {
        let view = ViewTransform {
            x: 10.0,
            y: -5.0,
            scale: 1.0,
        };
        let (cx, cy) = (100.0, 80.0);
        let zoomed = view.zoomed_about(2.0, cx, cy);
        // The world point under (cx, cy) must be unchanged.
        let world_before = ((cx - view.x) / view.scale, (cy - view.y) / view.scale);
        let world_after = ((cx - zoomed.x) / zoomed.scale, (cy - zoomed.y) / zoomed.scale);
        assert!((world_before.0 - world_after.0).abs() < 1e-4);
        assert!((world_before.1 - world_after.1).abs() < 1e-4);
    }

    #[test]
    fn memory_host_round_trips() {
        let mut host = MemoryViewState::new();
        assert!(host.load().is_none());
        let view = ViewTransform {
            x: 3.0,
            y: 4.0,
            scale: 2.0,
        };
        host.save(&view);
        assert_eq!(host.load(), Some(view));
    }
}
