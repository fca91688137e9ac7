//! Benchmarks for decoding and projecting analysis results
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use spendlens::analysis::*;
use spendlens::dashboard::{DashboardView, TextRenderer};
use spendlens::intake::UploadSurface;
use spendlens::session::RequestState;

fn response_body(categories: usize, days: usize) -> String {
    let by_category: serde_json::Map<String, serde_json::Value> = (0..categories)
        .map(|i| (format!("Category {}", i), serde_json::json!(i as f64 * 1.25)))
        .collect();
    let daily: Vec<serde_json::Value> = (0..days)
        .map(|d| {
            serde_json::json!({
                "date": format!("2024-{:02}-{:02}", d / 28 % 12 + 1, d % 28 + 1),
                "amount": d as f64 * 3.5,
            })
        })
        .collect();

    serde_json::json!({
        "summary": {"total": 1234.5},
        "by_category": by_category,
        "daily_spending": daily,
    })
    .to_string()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for days in [31, 365, 3650] {
        let body = response_body(20, days);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_function(format!("result_{}_days", days), |b| {
            b.iter(|| serde_json::from_str::<AnalysisResult>(black_box(&body)).unwrap())
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for categories in [10, 100, 1000] {
        let result: AnalysisResult =
            serde_json::from_str(&response_body(categories, 365)).unwrap();

        group.throughput(Throughput::Elements(categories as u64));

        group.bench_function(format!("pie_{}", categories), |b| {
            b.iter(|| {
                let slices = pie_slices(black_box(&result.by_category));
                slice_shares(&slices)
            })
        });

        group.bench_function(format!("bar_{}", categories), |b| {
            b.iter(|| bar_records(black_box(&result.by_category)))
        });
    }

    group.finish();
}

fn bench_text_render(c: &mut Criterion) {
    let result: AnalysisResult = serde_json::from_str(&response_body(20, 365)).unwrap();
    let state = RequestState::Ready(result);
    let surface = UploadSurface::new();

    c.bench_function("text_render_year", |b| {
        b.iter(|| {
            let mut renderer = TextRenderer::new();
            DashboardView::new(black_box(&state), &surface).render(&mut renderer);
            renderer.finish()
        })
    });
}

criterion_group!(benches, bench_decode, bench_projection, bench_text_render);
criterion_main!(benches);
