use std::path::Path;

use padview::layout::NodeKind;
use padview::scene::{RecordingSurface, SceneReconciler, SurfaceOp};
use padview::text_metrics::CharMetrics;
use padview::{GeometryNode, LayoutConfig, Theme, compute_layout, decode, render_svg};

fn render_fixture(path: &Path) -> (GeometryNode, String) {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let tree = decode(&input).expect("decode failed");
    let config = LayoutConfig::default();
    let root = compute_layout(&tree, &CharMetrics::default(), &config);
    let svg = render_svg(&root, &Theme::modern(), &config);
    (root, svg)
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn assert_geometry_invariants(node: &GeometryNode, config: &LayoutConfig, fixture: &str) {
    if node.kind() != NodeKind::Sequence {
        assert!(
            node.width >= config.min_width,
            "{fixture}: {} narrower than the floor",
            node.identity
        );
        assert!(
            node.height >= config.min_height,
            "{fixture}: {} shorter than the floor",
            node.identity
        );
    }
    for child in &node.children {
        assert!(
            child.x >= -1e-3 && child.y >= -1e-3,
            "{fixture}: {} escapes {} on the top/left",
            child.identity,
            node.identity
        );
        assert!(
            child.x + child.width <= node.width + 1e-3
                && child.y + child.height <= node.height + 1e-3,
            "{fixture}: {} escapes {} on the bottom/right",
            child.identity,
            node.identity
        );
        assert_geometry_invariants(child, config, fixture);
    }
}

#[test]
fn render_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "command.json",
        "sequence.json",
        "if_else.json",
        "if_no_else.json",
        "loop.json",
        "block_main.json",
        "nested.json",
        "multi_function.json",
        "error.json",
    ];

    let config = LayoutConfig::default();
    for rel in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let (geometry, svg) = render_fixture(&path);
        assert_valid_svg(&svg, rel);
        assert_geometry_invariants(&geometry, &config, rel);
    }
}

#[test]
fn reconciling_every_fixture_twice_is_stable() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let config = LayoutConfig::default();

    for rel in ["sequence.json", "nested.json", "multi_function.json"] {
        let input = std::fs::read_to_string(root.join(rel)).expect("fixture read failed");
        let tree = decode(&input).expect("decode failed");
        let geometry = compute_layout(&tree, &CharMetrics::default(), &config);

        let mut reconciler = SceneReconciler::with_memory_state();
        let mut surface = RecordingSurface::new();
        reconciler.render(&geometry, &config, &mut surface);
        let created = surface
            .ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::CreateGroup { .. }))
            .count();
        let mut node_count = 0usize;
        geometry.walk(&mut |_| node_count += 1);
        assert_eq!(created, node_count, "{rel}: every node enters once");

        surface.ops.clear();
        let recomputed = compute_layout(&tree, &CharMetrics::default(), &config);
        reconciler.render(&recomputed, &config, &mut surface);
        let substantive = surface
            .ops
            .iter()
            .filter(|op| !matches!(op, SurfaceOp::SetRootTransform(_)))
            .count();
        assert_eq!(substantive, 0, "{rel}: unchanged tree must patch nothing");
    }
}

#[test]
fn layout_is_deterministic_across_runs() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let input = std::fs::read_to_string(root.join("nested.json")).expect("fixture read failed");
    let tree = decode(&input).expect("decode failed");
    let config = LayoutConfig::default();
    let first = compute_layout(&tree, &CharMetrics::default(), &config);
    let second = compute_layout(&tree, &CharMetrics::default(), &config);
    assert_eq!(first, second);
}

#[test]
fn error_fixture_renders_placeholder_with_message() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let (geometry, svg) = render_fixture(&root.join("error.json"));
    let config = LayoutConfig::default();
    assert_eq!(geometry.width, config.min_width);
    assert_eq!(geometry.height, config.min_height);
    assert!(svg.contains("Parse error"));
}
