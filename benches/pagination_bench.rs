//! Pagination Benchmarks - Derivation and Cache Hot Path
//!
//! Benchmarks the page arithmetic that runs on every render and a
//! full fetch through the cache with an in-memory catalog.
//!
//! Run with: cargo bench --bench pagination_bench

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use felix_listing::domain::PaginationInfo;
use felix_listing::ports::{ListingError, ServiceCatalog, ServicePage};
use felix_listing::usecases::ListingCache;

/// Catalog that always answers with an empty window.
struct EmptyCatalog {
    total: u64,
}

#[async_trait]
impl ServiceCatalog for EmptyCatalog {
    async fn list_services(&self, limit: u64, offset: u64) -> Result<ServicePage, ListingError> {
        Ok(ServicePage {
            items: Vec::new(),
            total: self.total,
            limit,
            offset,
        })
    }
}

/// Benchmark pagination metadata derivation.
fn bench_pagination_derive(c: &mut Criterion) {
    c.bench_function("pagination_derive", |b| {
        b.iter(|| {
            let _info = PaginationInfo::derive(black_box(41), black_box(24), black_box(10_007));
        });
    });
}

/// Benchmark a fetch + apply cycle through the cache.
fn bench_cache_fetch(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");
    let cache = ListingCache::new(Arc::new(EmptyCatalog { total: 10_000 }), 24);

    c.bench_function("cache_fetch_page", |b| {
        b.to_async(&rt).iter(|| async {
            let _page = cache.fetch_page(black_box(24), black_box(480)).await;
        });
    });
}

criterion_group!(benches, bench_pagination_derive, bench_cache_fetch);
criterion_main!(benches);
