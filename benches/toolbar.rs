//! Benchmarks for toolbar actions.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use folio::editor::EditorBuffer;
use folio::surface::Selection;
use folio::toolbar::{Action, prefix_lines, wrap};

fn bench_wrap_mid_document(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    c.bench_function("wrap_mid_document", |b| {
        b.iter(|| wrap(black_box(md), Selection::new(40, 60), "**", "**", "太字"))
    });
}

fn bench_quote_whole_document(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    let all = Selection::new(0, md.chars().count());
    c.bench_function("quote_whole_document", |b| {
        b.iter(|| prefix_lines(black_box(md), all, "> ", "引用文"))
    });
}

fn bench_apply_every_action(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/post.md");
    c.bench_function("apply_every_action", |b| {
        b.iter(|| {
            let mut buffer = EditorBuffer::from_text(md);
            for action in Action::ALL {
                buffer.select(10, 20);
                action.apply(&mut buffer);
            }
            buffer
        })
    });
}

criterion_group!(
    benches,
    bench_wrap_mid_document,
    bench_quote_whole_document,
    bench_apply_every_action
);
criterion_main!(benches);
