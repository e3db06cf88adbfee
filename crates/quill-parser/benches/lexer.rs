use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_parser::Lexer;

fn bench_keywords(c: &mut Criterion) {
    let source = "record class init extends implements public private readonly new this";

    c.bench_function("lex_keywords", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");

    let simple = "record Point(int x, int y) { }";
    group.bench_with_input(BenchmarkId::new("simple", "2 components"), &simple, |b, source| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });

    let full = r#"
        /** A bounded range. */
        record Range(int lo, int hi) implements Ordered {
            init { if (lo > hi) fail("lo > hi!"); }
            width(): int { return this.hi - this.lo; }
        }
    "#;
    group.bench_with_input(BenchmarkId::new("full", "body + init"), &full, |b, source| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });

    group.finish();
}

fn bench_numbers(c: &mut Criterion) {
    let source = "42 123 0 999 1_000_000 3.14 2.718 1.23e4";

    c.bench_function("lex_numbers", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });
}

criterion_group!(benches, bench_keywords, bench_records, bench_numbers);
criterion_main!(benches);
