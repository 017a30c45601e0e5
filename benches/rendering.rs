//! Benchmarks for preview rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markpad::app::{Message, Model, update};
use markpad::document::{ComrakRenderer, Renderer};

fn bench_render_preview(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");

    c.bench_function("render_preview", |b| {
        b.iter(|| ComrakRenderer.render(black_box(md), black_box(60)));
    });
}

fn bench_visible_lines(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md").repeat(20);
    let doc = ComrakRenderer.render(&md, 60);

    c.bench_function("visible_lines", |b| {
        b.iter(|| doc.visible_lines(black_box(0), black_box(24)));
    });
}

fn bench_keystroke_update(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");

    c.bench_function("keystroke_update", |b| {
        b.iter_batched(
            || Model::new((120, 40)).with_text(md),
            |model| update(model, Message::EditorInsertChar(black_box('x'))),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_render_preview,
    bench_visible_lines,
    bench_keystroke_update
);
criterion_main!(benches);
