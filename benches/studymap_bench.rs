// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Parser and renderer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use studymap::graph::MindMapGraph;
use studymap::render::{render, DotOptions, DotRenderer};
use studymap::parse;

/// A study plan of `days` days with `tasks` tasks each, plus some noise
fn plan(days: usize, tasks: usize) -> String {
    let mut text = String::from("Topic\n");
    for d in 1..=days {
        text.push_str(&format!("Topic -> Day {d}\n"));
        for t in 1..=tasks {
            text.push_str(&format!("Day {d} -> Task {d}.{t}\n"));
        }
        text.push_str("\n-> stray\n");
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let small = plan(7, 5);
    let large = plan(90, 20);

    c.bench_function("parse_week_plan", |b| b.iter(|| parse(black_box(&small))));
    c.bench_function("parse_quarter_plan", |b| b.iter(|| parse(black_box(&large))));
}

fn bench_render(c: &mut Criterion) {
    let map = parse(&plan(90, 20));

    c.bench_function("render_dot", |b| {
        b.iter(|| render(black_box(&map), DotRenderer::new(DotOptions::default())))
    });
    c.bench_function("build_petgraph", |b| {
        b.iter(|| MindMapGraph::from_map(black_box(&map)).has_cycle())
    });
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
