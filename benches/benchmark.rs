use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use fuzzaction::formatter::{Formatter, FormatterRegistry};
use fuzzaction::literal::parse_literal;
use fuzzaction::term::{flatten, Term};

fn nested(depth: usize, width: usize) -> Term {
    if depth == 0 {
        return Term::from(depth as i64);
    }
    Term::from((0..width).map(|_| nested(depth - 1, width)).collect::<Vec<Term>>())
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let flat: Vec<Term> = (0..1000).map(|i| Term::from(i as i64)).collect();
    c.bench_function("flatten flat 1k", |b| b.iter(|| flatten(black_box(&flat))));
    let deep = vec![nested(6, 3)];
    c.bench_function("flatten nested 3^6", |b| b.iter(|| flatten(black_box(&deep))));

    let registry = FormatterRegistry::new();
    registry.add(Formatter::strings(|s| s.to_uppercase()));
    registry.add(Formatter::booleans(|b| if b { "yes".into() } else { "no".into() }));
    let line: Vec<Term> = (0..100)
        .map(|i| match i % 3 {
            0 => Term::from("text"),
            1 => Term::from(i as i64),
            _ => Term::from(i % 2 == 0),
        })
        .collect();
    c.bench_function("render line 100", |b| b.iter(|| registry.render_line(black_box(&line), "-")));

    let source = "main/parsefunctor(\"hello\", 666, false, [1, 2, inner(x)])";
    c.bench_function("parse literal", |b| b.iter(|| parse_literal(black_box(source))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
