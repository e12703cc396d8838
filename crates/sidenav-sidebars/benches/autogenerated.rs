//! Benchmarks for sidebar generation over synthetic document trees.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use sidenav_docs::{DocCollection, DocMetadata};
use sidenav_sidebars::{
    ProcessorProps, SidebarOptions, SidebarsConfig, generate, normalize, process, validate,
};

/// Build a collection with `sections` top-level directories, each holding
/// `depth` nested directories of `per_dir` documents.
fn generate_docs(sections: usize, depth: usize, per_dir: usize) -> DocCollection {
    let mut docs = Vec::with_capacity(sections * depth * per_dir);
    for s in 0..sections {
        let mut dir = format!("{s:02}-section-{s}");
        for d in 0..depth {
            if d > 0 {
                dir = format!("{dir}/{d:02}-level-{d}");
            }
            docs.push(DocMetadata::new(format!("{dir}/index"), format!("Level {d}")));
            for p in 0..per_dir {
                let position = i32::try_from(p).unwrap_or(i32::MAX);
                docs.push(
                    DocMetadata::new(format!("{dir}/page-{p}"), format!("Page {p}"))
                        .with_position(f64::from(position)),
                );
            }
        }
    }
    DocCollection::new(docs, Default::default())
}

fn bench_generate_tree(c: &mut Criterion) {
    let options = SidebarOptions::default();
    let mut group = c.benchmark_group("generate_tree");

    for (sections, depth, per_dir) in [(5, 2, 10), (20, 3, 20), (50, 4, 25)] {
        let docs = generate_docs(sections, depth, per_dir);
        group.throughput(Throughput::Elements(docs.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("docs", docs.len()),
            &docs,
            |b, docs| b.iter(|| generate(docs, ".", &options)),
        );
    }

    group.finish();
}

fn bench_process_default_sidebar(c: &mut Criterion) {
    let options = SidebarOptions::default();
    let docs = generate_docs(20, 3, 20);
    let config = SidebarsConfig::new().with_sidebar(
        "defaultSidebar",
        json!([{"type": "autogenerated", "dirName": "."}]),
    );
    let validated = validate(&config).unwrap();

    c.bench_function("process_default_sidebar", |b| {
        b.iter(|| {
            let normalized = normalize(validated.clone(), &options);
            process(
                normalized,
                ProcessorProps {
                    docs: &docs,
                    options: &options,
                },
            )
        });
    });
}

fn bench_process_explicit_sidebar(c: &mut Criterion) {
    let options = SidebarOptions::default();
    let docs = generate_docs(10, 2, 20);
    let ids: Vec<_> = docs.ids().map(str::to_owned).collect();
    let config = SidebarsConfig::new().with_sidebar("docs", json!([{ "All": ids }]));
    let validated = validate(&config).unwrap();

    c.bench_function("process_explicit_sidebar", |b| {
        b.iter(|| {
            let normalized = normalize(validated.clone(), &options);
            process(
                normalized,
                ProcessorProps {
                    docs: &docs,
                    options: &options,
                },
            )
        });
    });
}

criterion_group!(
    benches,
    bench_generate_tree,
    bench_process_default_sidebar,
    bench_process_explicit_sidebar,
);
criterion_main!(benches);
