//! Planning and validation benchmarks for many-component layouts.
//!
//! Both `plan()` and `ValidationEngine::validate` are O(n²) in the pane
//! count at worst (pairwise overlap checks); these benches track how they
//! behave as layouts grow well past the product's five standard panes.
//!
//! Run with: cargo bench --bench plan_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paneflow::model::{
    ComponentCatalog, ComponentKey, ComponentPlacement, LayoutDefinition, LayoutId, LayoutKind,
    Rect,
};
use paneflow::responsive::{resolve, Breakpoint};
use paneflow::transition::plan;
use paneflow::validation::ValidationEngine;

/// Generate a layout tiling `n` panes across the viewport.
fn generate_layout(id: &str, n: usize, jitter: f64) -> LayoutDefinition {
    let columns = (n as f64).sqrt().ceil() as usize;
    let cell = 100.0 / columns as f64;
    let mut components = BTreeMap::new();
    for i in 0..n {
        let col = (i % columns) as f64;
        let row = (i / columns) as f64;
        let rect = Rect::new(
            (col * cell + jitter).min(100.0 - cell),
            (row * cell + jitter).min(100.0 - cell),
            cell,
            cell,
        );
        components.insert(
            ComponentKey::new(format!("pane-{i}")).expect("non-empty key"),
            ComponentPlacement::new(rect),
        );
    }
    LayoutDefinition::new(
        LayoutId::new(id).expect("non-empty id"),
        "Benchmark",
        LayoutKind::Custom,
        components,
    )
}

fn benchmark_plan_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_scaling");

    for n in [5usize, 25, 100, 400] {
        // Jitter the target so every pane registers as a move.
        let prev = resolve(&generate_layout("bench-prev", n, 0.0), Breakpoint::Desktop);
        let next = resolve(&generate_layout("bench-next", n, 1.0), Breakpoint::Desktop);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| plan(black_box(Some(&prev)), black_box(&next)))
        });
    }

    group.finish();
}

fn benchmark_validate_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_scaling");
    let engine = ValidationEngine::with_default_rules();
    let catalog = ComponentCatalog::default();

    for n in [5usize, 25, 100, 400] {
        let layout = generate_layout("bench-validate", n, 0.0);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| engine.validate(black_box(&layout), black_box(&catalog)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_plan_scaling, benchmark_validate_scaling);
criterion_main!(benches);
