//! Performance benchmarks for hypergraph-codegen.
//!
//! Measures generation across:
//! - Schema size (1, 10, 50 properties)
//! - Publishing strategies and flavors
//! - Quickstart projects per framework
//!
//! Run with: cargo bench --package hypergraph-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hypergraph_codegen::Generator;
use hypergraph_core::{PublishingRequest, QuickstartRequest, SchemaRequest};
use serde_json::json;
use std::hint::black_box;

// ============================================================================
// Test Data Generators
// ============================================================================

/// Creates a schema request with `count` properties cycling through kinds.
fn create_schema_request(count: usize) -> SchemaRequest {
    let kinds = ["Text", "Number", "Checkbox", "Date", "Email", "URL", "JSON"];
    let properties: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "name": format!("field{i}"),
                "type": kinds[i % kinds.len()],
                "required": i % 3 == 0
            })
        })
        .collect();
    serde_json::from_value(json!({
        "entityName": "Event",
        "properties": properties,
        "relations": [{ "name": "attendees", "target": "User", "type": "many-to-many" }]
    }))
    .unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_schema(c: &mut Criterion) {
    let generator = Generator::new().unwrap();
    let mut group = c.benchmark_group("schema");

    for count in [1, 10, 50] {
        let request = create_schema_request(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &request, |b, request| {
            b.iter(|| generator.schema(black_box(request)).unwrap());
        });
    }

    group.finish();
}

fn bench_publishing(c: &mut Criterion) {
    let generator = Generator::new().unwrap();
    let mut group = c.benchmark_group("publishing");

    for strategy in ["immediate", "batch", "scheduled", "conditional"] {
        for framework in ["react", "typescript", "vanilla-js"] {
            let request: PublishingRequest = serde_json::from_value(json!({
                "entityType": "Post",
                "publishingStrategy": strategy,
                "framework": framework,
                "queueLength": 25
            }))
            .unwrap();
            group.bench_with_input(
                BenchmarkId::new(strategy, framework),
                &request,
                |b, request| {
                    b.iter(|| generator.publishing(black_box(request)).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_quickstart(c: &mut Criterion) {
    let generator = Generator::new().unwrap();
    let mut group = c.benchmark_group("quickstart");

    for framework in ["react", "nextjs", "vanilla-ts", "express-api"] {
        let request: QuickstartRequest = serde_json::from_value(json!({
            "framework": framework,
            "entityTypes": ["Event", "User", "Post", "Product"]
        }))
        .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(framework),
            &request,
            |b, request| {
                b.iter(|| generator.quickstart(black_box(request)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_generator_creation(c: &mut Criterion) {
    c.bench_function("generator_new", |b| {
        b.iter(|| black_box(Generator::new().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_schema,
    bench_publishing,
    bench_quickstart,
    bench_generator_creation
);
criterion_main!(benches);
