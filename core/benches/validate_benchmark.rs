use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use formcheck::api::*;
use formcheck::rules;
use serde_json::{json, Value};
use std::hint::black_box;
use std::time::Duration;

fn flat_form(fields: usize) -> Form {
    (0..fields).fold(Form::new("flat"), |form, i| {
        form.field(
            format!("field_{i}"),
            FieldSpec::rules([rules::of_type(JsonType::String), rules::min_length(3)]),
        )
    })
}

fn flat_candidate(fields: usize) -> Value {
    let object = (0..fields)
        .map(|i| (format!("field_{i}"), json!(format!("value {i}"))))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(object)
}

fn benchmark_flat_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_validation");
    group.measurement_time(Duration::from_secs(10));

    // Test different form widths
    for size in [1, 10, 100, 1000].iter() {
        let form = flat_form(*size);
        let candidate = flat_candidate(*size);

        group.bench_with_input(BenchmarkId::new("validate", size), &candidate, |b, candidate| {
            b.iter(|| {
                let summary = validate(black_box(&form), black_box(candidate));
                black_box(summary)
            });
        });
    }

    group.finish();
}

fn nested_form(depth: usize) -> Form {
    (0..depth).fold(
        Form::new("leaf").field("value", FieldSpec::rules([rules::in_range(0.0, 10.0)])),
        |inner, level| {
            Form::new(format!("level_{level}"))
                .field("value", FieldSpec::rules([rules::in_range(0.0, 10.0)]))
                .field("child", FieldSpec::form(inner))
        },
    )
}

fn nested_candidate(depth: usize, value: i64) -> Value {
    (0..depth).fold(json!({"value": value}), |inner, _| {
        json!({"value": value, "child": inner})
    })
}

fn benchmark_nested_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_validation");

    let form = nested_form(16);
    let valid = nested_candidate(16, 5);
    let invalid = nested_candidate(16, 50);

    group.bench_function("validate_nested_valid", |b| {
        b.iter(|| black_box(validate(black_box(&form), black_box(&valid))));
    });

    group.bench_function("validate_nested_invalid", |b| {
        b.iter(|| black_box(validate(black_box(&form), black_box(&invalid))));
    });

    // Flattening cost on a deep failure tree
    let summary = validate(&form, &invalid);
    group.bench_function("errors_flat_nested", |b| {
        b.iter(|| black_box(black_box(&summary).errors_flat("")));
    });

    group.finish();
}

criterion_group!(benches, benchmark_flat_validation, benchmark_nested_validation);
criterion_main!(benches);
