use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use padview::text_metrics::CharMetrics;
use padview::{ControlFlowNode, LayoutConfig, Theme, compute_layout, render_svg};
use std::hint::black_box;

fn command(label: &str) -> ControlFlowNode {
    ControlFlowNode::Command {
        label: label.to_string(),
    }
}

/// A function body alternating commands, conditionals, and loops, nested
/// `depth` levels deep with `width` statements per level.
fn synthetic_tree(depth: usize, width: usize) -> ControlFlowNode {
    fn level(depth: usize, width: usize) -> ControlFlowNode {
        let mut children = Vec::with_capacity(width);
        for idx in 0..width {
            let child = if depth == 0 {
                command(&format!("step_{idx}();"))
            } else {
                match idx % 3 {
                    0 => ControlFlowNode::If {
                        condition: format!("flag_{idx}"),
                        then_block: Box::new(level(depth - 1, width)),
                        else_block: Some(Box::new(command("fallback();"))),
                    },
                    1 => ControlFlowNode::Loop {
                        condition: format!("i < {idx}"),
                        body: Box::new(level(depth - 1, width)),
                    },
                    _ => command(&format!("acc += {idx};")),
                }
            };
            children.push(child);
        }
        ControlFlowNode::Sequence { children }
    }

    ControlFlowNode::Block {
        label: "fn synthetic()".to_string(),
        children: vec![level(depth, width)],
    }
}

fn bench_layout(c: &mut Criterion) {
    let metrics = CharMetrics::default();
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("compute_layout");
    for (depth, width) in [(2usize, 3usize), (3, 4), (4, 4)] {
        let tree = synthetic_tree(depth, width);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("depth{depth}_width{width}")),
            &tree,
            |b, tree| b.iter(|| compute_layout(black_box(tree), &metrics, &config)),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let metrics = CharMetrics::default();
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let tree = synthetic_tree(3, 4);
    let geometry = compute_layout(&tree, &metrics, &config);
    c.bench_function("render_svg_depth3_width4", |b| {
        b.iter(|| render_svg(black_box(&geometry), &theme, &config))
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
