use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use trellis::{
    NodeId, Tree,
    controls::{Fixed, Label, Panel, StackLayout},
    geom::Size,
    layout::Dock,
};

const DOCKS: [Dock; 5] = [Dock::Top, Dock::Left, Dock::Bottom, Dock::Right, Dock::Fill];

/// Build a pseudo-random tree of containers and leaves.
fn generate(nodes: usize, seed: u64) -> (Tree, Vec<NodeId>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = Tree::new(Panel);
    let mut containers = vec![tree.root_id()];
    let mut leaves = Vec::new();

    for i in 0..nodes {
        let parent = containers[rng.random_range(0..containers.len())];
        let id = match rng.random_range(0..4) {
            0 => tree.add_child(parent, Panel),
            1 => tree.add_child(parent, StackLayout::new(rng.random_bool(0.5))),
            2 => tree.add_child(
                parent,
                Fixed::new(rng.random_range(0..12), rng.random_range(0..4)),
            ),
            _ => tree.add_child(parent, Label::new(format!("label {i}")).with_wrap(true)),
        }
        .expect("parent exists");
        tree.set_dock(id, DOCKS[rng.random_range(0..DOCKS.len())])
            .expect("node exists");
        if tree
            .node(id)
            .is_some_and(|n| *n.name() == "panel" || *n.name() == "stack_layout")
        {
            containers.push(id);
        } else {
            leaves.push(id);
        }
    }
    (tree, leaves)
}

fn benchmark_layout(c: &mut Criterion) {
    c.bench_function("full_pass_500", |b| {
        let (mut tree, _) = generate(500, 7);
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let screen = if wide {
                Size::new(200, 60)
            } else {
                Size::new(120, 40)
            };
            black_box(tree.layout(screen).expect("layout"))
        });
    });

    c.bench_function("leaf_invalidation_500", |b| {
        let (mut tree, leaves) = generate(500, 7);
        tree.layout(Size::new(200, 60)).expect("layout");
        let mut next = 0;
        b.iter(|| {
            next = (next + 1) % leaves.len().max(1);
            if let Some(leaf) = leaves.get(next) {
                tree.invalidate(*leaf).expect("invalidate");
            }
            black_box(tree.layout(Size::new(200, 60)).expect("layout"))
        });
    });
}

criterion_group!(benches, benchmark_layout);
criterion_main!(benches);
