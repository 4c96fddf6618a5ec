//! Binding and generation benchmarks.
//!
//! Run with: cargo bench -p ironbind-bench --bench generation

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ironbind_bench::{synthetic_package, synthetic_resource};
use ironbind_codegen::emit::emit;
use ironbind_codegen::{BindingBuilder, Generator, LanguageRules, RuleSet};
use std::hint::black_box;

fn benchmark_build_binding(c: &mut Criterion) {
    let resource = synthetic_resource("bench:core:Widget", 32);
    let mut package = ironbind_schema::Package::new("bench", "1.0.0");
    package.add_resource(resource.clone());

    let mut group = c.benchmark_group("build_binding");
    for rules in [
        LanguageRules::dotnet(),
        LanguageRules::nodejs(),
        LanguageRules::python(),
    ] {
        let builder = BindingBuilder::new(&rules);
        group.bench_function(rules.language.tag(), |b| {
            b.iter(|| {
                builder
                    .build(black_box(&package), black_box(&resource))
                    .expect("binding builds")
            })
        });
    }
    group.finish();
}

fn benchmark_emit(c: &mut Criterion) {
    let resource = synthetic_resource("bench:core:Widget", 32);
    let mut package = ironbind_schema::Package::new("bench", "1.0.0");
    package.add_resource(resource.clone());

    let mut group = c.benchmark_group("emit");
    for rules in [
        LanguageRules::dotnet(),
        LanguageRules::nodejs(),
        LanguageRules::python(),
    ] {
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");
        group.bench_function(rules.language.tag(), |b| b.iter(|| emit(black_box(&binding))));
    }
    group.finish();
}

fn benchmark_generate_package(c: &mut Criterion) {
    let package = synthetic_package(64, 16);

    let mut group = c.benchmark_group("generate_package");
    group.throughput(Throughput::Elements(package.resources.len() as u64));
    for workers in [1, 4] {
        let generator = Generator::new(RuleSet::defaults()).workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &package, |b, package| {
            b.iter(|| generator.generate(black_box(package)).expect("generates"))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_build_binding,
    benchmark_emit,
    benchmark_generate_package
);
criterion_main!(benches);
