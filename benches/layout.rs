//! Benchmarks for layout computation performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablegrid::{LayoutConfig, Rect, TableDataSource, TableLayout};

struct LargeSource {
    rows: usize,
    columns: usize,
}

impl TableDataSource for LargeSource {
    fn number_of_rows(&self) -> usize {
        self.rows
    }

    fn number_of_columns(&self) -> usize {
        self.columns
    }

    fn column_width(&self, column: usize) -> f32 {
        80.0 + (column % 5) as f32 * 20.0
    }

    fn row_height(&self, row: usize) -> Option<f32> {
        Some(32.0 + (row % 3) as f32 * 8.0)
    }
}

/// Benchmark the full geometry pass over a large table
fn bench_full_pass(c: &mut Criterion) {
    let source = LargeSource {
        rows: 10_000,
        columns: 50,
    };

    c.bench_function("full_pass_10000x50", |b| {
        b.iter(|| {
            let mut layout = TableLayout::new(LayoutConfig::default());
            layout.set_bounds(Rect::new(0.0, 0.0, 1280.0, 800.0));
            layout.prepare(black_box(&source));
            black_box(layout.content_size())
        })
    });
}

/// Benchmark one scroll frame: partial prepare plus viewport query
fn bench_scroll_frame(c: &mut Criterion) {
    let source = LargeSource {
        rows: 10_000,
        columns: 50,
    };
    let mut layout = TableLayout::new(LayoutConfig {
        row_header_height: 18.0,
        first_frozen_columns: 2,
        ..LayoutConfig::default()
    });
    layout.set_bounds(Rect::new(0.0, 0.0, 1280.0, 800.0));
    layout.prepare(&source);
    let content_height = layout.content_size().height;

    c.bench_function("scroll_frame_10000x50", |b| {
        let mut y = 0.0_f32;
        b.iter(|| {
            y = (y + 40.0) % (content_height - 800.0);
            layout.set_bounds(Rect::new(0.0, y, 1280.0, 800.0));
            layout.prepare(&source);
            black_box(layout.attributes_in_rect(layout.bounds()).len())
        })
    });
}

/// Benchmark lazy item lookups scattered across a cold cache
fn bench_item_lookup(c: &mut Criterion) {
    let source = LargeSource {
        rows: 10_000,
        columns: 50,
    };
    let mut layout = TableLayout::new(LayoutConfig::default());
    layout.set_bounds(Rect::new(0.0, 0.0, 1280.0, 800.0));
    layout.prepare(&source);

    c.bench_function("lazy_item_lookup", |b| {
        let mut row = 0_usize;
        b.iter(|| {
            row = (row + 997) % 10_000;
            black_box(layout.attributes_for_item(row, row % 50))
        })
    });
}

criterion_group!(
    benches,
    bench_full_pass,
    bench_scroll_frame,
    bench_item_lookup
);
criterion_main!(benches);
