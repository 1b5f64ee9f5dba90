//! List engine and pager window throughput
//!
//! The admin screens re-run the full pipeline on every keystroke, so a
//! search + filter + sort over a few thousand rows has to stay well under a
//! frame.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use storefront_admin::domain::{
    FilterValue, ListQuery, ListQueryEngine, PageWindowCalculator, Product, SortSpec,
};
use storefront_admin::infrastructure::{MockCatalog, MockDataConfig};

fn products(count: usize) -> Vec<Product> {
    MockCatalog::generate(&MockDataConfig {
        products: count,
        sellers: 50,
        users: 0,
        websites: 0,
        customers: 0,
        ..MockDataConfig::default()
    })
    .map(|catalog| catalog.products)
    .unwrap_or_default()
}

fn engine_pipeline(c: &mut Criterion) {
    let engine = ListQueryEngine::for_entity::<Product>();
    let mut group = c.benchmark_group("list_engine");

    for size in [1_000usize, 10_000] {
        let rows = products(size);

        let page_only = ListQuery::new(3, 20);
        group.bench_with_input(BenchmarkId::new("page_only", size), &rows, |b, rows| {
            b.iter(|| engine.select(black_box(rows), black_box(&page_only)))
        });

        let full = ListQuery::new(1, 50)
            .with_search("acme")
            .with_filter("status", FilterValue::exact("active"))
            .with_sort(Some(SortSpec::desc("price")));
        group.bench_with_input(BenchmarkId::new("search_filter_sort", size), &rows, |b, rows| {
            b.iter(|| engine.execute(black_box(rows), black_box(&full)))
        });
    }

    group.finish();
}

fn page_window(c: &mut Criterion) {
    let calc = PageWindowCalculator::default();
    c.bench_function("page_window_100k_pages", |b| {
        b.iter(|| calc.compute(black_box(50_000), black_box(100_000), 1_000_000, 10))
    });
}

criterion_group!(benches, engine_pipeline, page_window);
criterion_main!(benches);
