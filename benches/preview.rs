//! Benchmarks for preview rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use folio::content::excerpt;
use folio::editor::EditorBuffer;
use folio::preview::{ComrakRenderer, PreviewPane, Renderer, refresh_preview};

fn bench_render_post(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    let renderer = ComrakRenderer::default();
    c.bench_function("render_post", |b| b.iter(|| renderer.render(black_box(md))));
}

fn bench_refresh_pane(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    let renderer = ComrakRenderer::default();
    let buffer = EditorBuffer::from_text(md);
    let mut pane = PreviewPane::visible();
    c.bench_function("refresh_pane", |b| {
        b.iter(|| refresh_preview(black_box(&buffer), &mut pane, &renderer))
    });
}

fn bench_card_excerpt(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    c.bench_function("card_excerpt", |b| b.iter(|| excerpt(black_box(md), 160)));
}

criterion_group!(benches, bench_render_post, bench_refresh_pane, bench_card_excerpt);
criterion_main!(benches);
