//! Benchmarks for the diff engine.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use openapi_diff::diff::DiffEngine;
use openapi_diff::model::{
    HttpMethod, MediaType, OpenApiSpec, Operation, Parameter, ParameterLocation, PathItem,
    Response, Schema, SchemaRef,
};
use openapi_diff::parsers::parse_spec_str;
use std::hint::black_box;

/// An object schema with `width` string properties.
fn object_schema(width: usize, renamed: usize) -> SchemaRef {
    SchemaRef::new(Schema::object((0..width).map(|i| {
        let name = if i < renamed {
            format!("renamed_{i}")
        } else {
            format!("field_{i}")
        };
        (name, SchemaRef::new(Schema::string()))
    })))
}

/// Generate a document with `count` paths, each with a GET returning an object.
fn generate_spec(label: &str, count: usize, changed: usize) -> OpenApiSpec {
    let mut spec = OpenApiSpec::new(label);
    for i in 0..count {
        let renamed = usize::from(i < changed);
        let mut response = Response::default();
        response.content.insert(
            "application/json".to_string(),
            MediaType::new(object_schema(20, renamed)),
        );
        let mut operation = Operation::default();
        operation.parameters.push(
            Parameter::new("limit", ParameterLocation::Query)
                .with_schema(SchemaRef::new(Schema::of_type("integer"))),
        );
        operation.responses.insert("200".to_string(), response);
        spec.add_path(
            format!("/resource{i}/{{id}}"),
            PathItem::default().with_operation(HttpMethod::Get, operation),
        );
    }
    spec
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for size in [10, 100, 1000] {
        let base = generate_spec("base", size, 0);
        let revision = generate_spec("revision", size, size / 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                DiffEngine::new()
                    .diff(black_box(&base), black_box(&revision))
                    .expect("diff")
            });
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let document = include_str!("../tests/fixtures/petstore-v1.yaml");
    c.bench_function("parse_petstore", |b| {
        b.iter(|| parse_spec_str(black_box(document), "petstore.yaml").expect("parse"));
    });
}

criterion_group!(benches, benchmark_diff, benchmark_parse);
criterion_main!(benches);
