pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scene;
pub mod text_metrics;
pub mod theme;

pub use ast::{ControlFlowNode, decode};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use layout::{GeometryNode, compute_layout};
pub use render::render_svg;
pub use scene::SceneReconciler;
pub use theme::Theme;
