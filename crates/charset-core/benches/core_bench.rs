//! Benchmarks for core model operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use charset_core::document::{DocumentContent, ResponseHeaders};

fn bench_header_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("ResponseHeaders");

    group.bench_function("build_50_headers", |b| {
        b.iter(|| {
            let mut headers = ResponseHeaders::new();
            for i in 0..50 {
                headers.push(format!("X-Header-{}", i), "value");
            }
            headers.push("Content-Type", "text/html; charset=utf-8");
            black_box(&headers);
        })
    });

    group.bench_function("lookup_content_type_50_headers", |b| {
        let mut headers = ResponseHeaders::new();
        for i in 0..50 {
            headers.push(format!("X-Header-{}", i), "value");
        }
        headers.push("Content-Type", "text/html; charset=utf-8");
        b.iter(|| black_box(headers.get(black_box("content-type"))))
    });

    group.finish();
}

fn bench_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("DocumentContent");
    let text = "<p>Grüße aus Köln</p>".repeat(500);

    group.bench_function("from_decoded_windows_1252", |b| {
        b.iter(|| black_box(DocumentContent::from_decoded(&text, encoding_rs::WINDOWS_1252)))
    });

    group.bench_function("from_decoded_utf_16le", |b| {
        b.iter(|| black_box(DocumentContent::from_decoded(&text, encoding_rs::UTF_16LE)))
    });

    group.finish();
}

criterion_group!(benches, bench_header_lookup, bench_content);
criterion_main!(benches);
