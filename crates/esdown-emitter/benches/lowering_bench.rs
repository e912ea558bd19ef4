//! Lowering Benchmark
//!
//! Measures `for...of` lowering throughput (bytes/sec) end to end.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use esdown_emitter::{EmitContext, EditBuffer, EditOptions, transpile};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
var total = 0;
for (var n of numbers) {
    total += n;
}
"#;

const PATTERN_SOURCE: &str = r#"
function index(entries) {
    var out = {};
    for (let [key, {id, tags = []}] of entries) {
        out[key] = id;
        for (const tag of tags) out[tag] = key;
    }
    return out;
}
"#;

/// Generate a large source with many functions, each holding a few loops.
fn generate_large_source(functions: usize, loops_per_fn: usize) -> String {
    let mut source = String::with_capacity(functions * loops_per_fn * 64);

    for f in 0..functions {
        source.push_str(&format!("function fn{f}(list) {{\n"));
        for l in 0..loops_per_fn {
            source.push_str(&format!(
                "    for (var [k{l}, v{l}] of list.slice({l})) {{ use(k{l}, v{l}); }}\n"
            ));
        }
        source.push_str("}\n\n");
    }

    source
}

// =============================================================================
// Lowering Benchmarks
// =============================================================================

fn bench_lower_simple(c: &mut Criterion) {
    let ctx = EmitContext::default();
    c.bench_function("lower_simple", |b| {
        b.iter(|| black_box(transpile("bench.js", SIMPLE_SOURCE, &ctx)))
    });
}

fn bench_lower_patterns(c: &mut Criterion) {
    let ctx = EmitContext::default();
    c.bench_function("lower_patterns", |b| {
        b.iter(|| black_box(transpile("bench.js", PATTERN_SOURCE, &ctx)))
    });
}

/// Benchmark: lowering throughput for various sizes
fn bench_lower_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_throughput");
    let ctx = EmitContext::arrays_only();

    for (functions, loops) in [(10, 2), (50, 4), (200, 4)] {
        let source = generate_large_source(functions, loops);
        let label = format!("{functions}fn_{loops}loops");

        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("transpile", &label), &source, |b, source| {
            b.iter(|| black_box(transpile("bench.js", source, &ctx)))
        });
    }

    group.finish();
}

/// Benchmark: edit buffer commit with many scattered inserts
fn bench_edit_buffer_commit(c: &mut Criterion) {
    let source = generate_large_source(200, 4);
    c.bench_function("edit_buffer_commit", |b| {
        b.iter(|| {
            let mut edits = EditBuffer::new(source.as_str());
            for pos in (0..source.len() as u32).step_by(16) {
                let _ = edits.insert(pos, "/**/", EditOptions::NONE);
            }
            black_box(edits.commit())
        })
    });
}

criterion_group!(
    benches,
    bench_lower_simple,
    bench_lower_patterns,
    bench_lower_throughput,
    bench_edit_buffer_commit
);
criterion_main!(benches);
