//! Incremental scene maintenance: identity-keyed reconciliation of geometry
//! trees against a drawing surface, plus the interactive state layered on top
//! (manual node offsets, drag, pan/zoom).

mod reconciler;
pub mod recording;
pub mod shapes;
mod surface;
mod view;

pub use reconciler::SceneReconciler;
pub use recording::{RecordingSurface, SurfaceOp};
pub use surface::{PositionChange, Shape, ShapeRole, Surface, TextAnchor};
pub use view::{MAX_SCALE, MIN_SCALE, MemoryViewState, ViewStateHost, ViewTransform};
