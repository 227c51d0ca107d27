use criterion::{criterion_group, criterion_main, Criterion};

use aoc2023_almanac::*;

fn bench_day<S, T>(c: &mut Criterion, n: usize, day: fn(&str) -> anyhow::Result<(S, T)>) {
    let Ok(input) = default_input(n) else {
        eprintln!("day{}: no input, skipping", n);
        return;
    };
    c.bench_function(&format!("day{}", n), |b| b.iter(|| day(&input)));
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_day(c, 1, day1);
    bench_day(c, 2, day2);
    bench_day(c, 3, day3);
    bench_day(c, 4, day4);
    bench_day(c, 5, day5);
    bench_day(c, 6, day6);
    bench_day(c, 7, day7);
    bench_day(c, 8, day8);
    bench_day(c, 9, day9);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
