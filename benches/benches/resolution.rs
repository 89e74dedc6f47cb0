//! Resolution cost: naive join + soft-canonicalize vs. the confined roots
//!
//! The naive pattern joins the untrusted target straight onto the root and
//! canonicalizes it. It is fast and wrong (it follows `..` and absolute
//! targets out of the root). The confined roots add the lexical pass and the
//! containment check; this benchmark shows what that costs per target.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use resource_root::{identity, ExtensionMap, ExtensionOverlayRoot, FilesystemRoot};
use resource_root_benches::SiteWorkload;
use soft_canonicalize::soft_canonicalize;
use std::hint::black_box;
use std::path::Path;

fn naive_pattern(root: &Path, requests: &[String]) {
    let root = soft_canonicalize(root).unwrap();
    for request in requests {
        let canon = soft_canonicalize(root.join(black_box(request)).with_extension("md"));
        let _ = black_box(canon);
    }
}

fn filesystem_root_pattern(root: &FilesystemRoot, requests: &[String]) {
    for request in requests {
        let resolved = root.resolve(black_box(request)).unwrap();
        black_box(&resolved);
    }
}

fn overlay_pattern(root: &ExtensionOverlayRoot, requests: &[String]) {
    for request in requests {
        let resolved = root.resolve(black_box(request)).unwrap();
        black_box(&resolved);
    }
}

fn overlay_read_pattern(root: &ExtensionOverlayRoot, requests: &[String]) {
    for request in requests {
        let content = root.read(black_box(request)).unwrap();
        black_box(&content);
    }
}

fn bench_batches(c: &mut Criterion) {
    for count in [10usize, 100, 1000] {
        let workload = SiteWorkload::new(count).expect("Failed to create workload");
        let plain = FilesystemRoot::try_new(workload.site_root()).unwrap();
        let map = ExtensionMap::new()
            .with(".md", identity)
            .with(".txt", identity);
        let overlay = ExtensionOverlayRoot::from_root(plain.clone(), map);

        let mut group = c.benchmark_group(format!("batch_{count}_requests"));
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function("naive_soft_canonicalize", |b| {
            b.iter(|| naive_pattern(workload.site_root(), workload.requests()));
        });

        group.bench_function("filesystem_root_resolve", |b| {
            b.iter(|| filesystem_root_pattern(&plain, workload.requests()));
        });

        group.bench_function("overlay_resolve", |b| {
            b.iter(|| overlay_pattern(&overlay, workload.requests()));
        });

        group.bench_function("overlay_read", |b| {
            b.iter(|| overlay_read_pattern(&overlay, workload.requests()));
        });

        group.finish();
    }
}

criterion_group!(benches, bench_batches);
criterion_main!(benches);
