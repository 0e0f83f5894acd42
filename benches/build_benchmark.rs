//! Benchmarks for specdoc resolution, building and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic API description with a chain of
//! definitions that reference each other.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};

/// Creates a synthetic Swagger 2.0 document with `tag_count` tags, each with
/// `ops_per_tag` operations returning a cyclic definition.
fn create_test_spec(tag_count: usize, ops_per_tag: usize) -> Vec<u8> {
    let mut definitions = Map::new();
    for i in 0..tag_count {
        let next = (i + 1) % tag_count;
        definitions.insert(
            format!("Model{}", i),
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer", "format": "int64"},
                    "name": {"type": "string", "description": "Display name"},
                    "next": {"$ref": format!("#/definitions/Model{}", next)},
                    "children": {"type": "array", "items": {"$ref": format!("#/definitions/Model{}", i)}}
                }
            }),
        );
    }

    let mut paths = Map::new();
    let mut tags = Vec::new();
    for t in 0..tag_count {
        let tag = format!("group{}", t);
        tags.push(json!({"name": tag}));
        for o in 0..ops_per_tag {
            paths.insert(
                format!("/group{}/items{}/{{id}}", t, o),
                json!({
                    "get": {
                        "tags": [tag],
                        "summary": format!("Get item {}", o),
                        "operationId": format!("getItem{}_{}", t, o),
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "type": "integer"},
                            {"name": "verbose", "in": "query", "type": "boolean"}
                        ],
                        "responses": {
                            "200": {"description": "OK", "schema": {"$ref": format!("#/definitions/Model{}", t)}},
                            "404": {"description": "Not found"}
                        }
                    }
                }),
            );
        }
    }

    let doc = json!({
        "swagger": "2.0",
        "info": {"title": "Benchmark", "version": "1.0"},
        "tags": Value::Array(tags),
        "definitions": Value::Object(definitions),
        "paths": Value::Object(paths),
    });
    serde_json::to_vec(&doc).unwrap()
}

/// Benchmark parsing and reference resolution.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for (tags, ops) in [(2, 5), (10, 10), (20, 25)] {
        let data = create_test_spec(tags, ops);
        group.bench_function(format!("{}x{}_operations", tags, ops), |b| {
            b.iter(|| specdoc::parse_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark document model building at increasing expansion depth.
fn bench_build(c: &mut Criterion) {
    let spec = specdoc::parse_bytes(&create_test_spec(10, 10)).unwrap();
    let mut group = c.benchmark_group("build");

    for depth in [1, 3] {
        let options = specdoc::BuildOptions::new().with_property_depth(depth);
        group.bench_function(format!("depth_{}", depth), |b| {
            b.iter(|| specdoc::build_api_document(black_box(&spec), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark docx rendering.
fn bench_render(c: &mut Criterion) {
    let spec = specdoc::parse_bytes(&create_test_spec(10, 10)).unwrap();
    let doc = specdoc::build_api_document(&spec, &specdoc::BuildOptions::new()).unwrap();
    let options = specdoc::RenderOptions::default();

    c.bench_function("render_docx", |b| {
        b.iter(|| specdoc::render::to_docx(black_box(&doc), &options).unwrap());
    });

    let stored = specdoc::RenderOptions::new().with_compression(false);
    c.bench_function("render_docx_stored", |b| {
        b.iter(|| specdoc::render::to_docx(black_box(&doc), &stored).unwrap());
    });
}

criterion_group!(benches, bench_resolve, bench_build, bench_render);
criterion_main!(benches);
