use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};

use aoc2023_almanac::*;

const DAYS: usize = 9;

fn main() -> Result<()> {
    let selected = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<usize>()
                .with_context(|| format!("invalid day {:?}", arg))
        })
        .collect::<Result<Vec<_>>>()?;
    if let Some(day) = selected.iter().find(|&&day| !(1..=DAYS).contains(&day)) {
        bail!("day {} is not solved (1-{} are)", day, DAYS);
    }
    let wanted = |n: usize| selected.is_empty() || selected.contains(&n);

    let mut total = Duration::default();
    if wanted(1) {
        total += execute_day(1, day1, default_input)?;
    }
    if wanted(2) {
        total += execute_day(2, day2, default_input)?;
    }
    if wanted(3) {
        total += execute_day(3, day3, default_input)?;
    }
    if wanted(4) {
        total += execute_day(4, day4, default_input)?;
    }
    if wanted(5) {
        total += execute_day(5, day5, default_input)?;
    }
    if wanted(6) {
        total += execute_day(6, day6, default_input)?;
    }
    if wanted(7) {
        total += execute_day(7, day7, default_input)?;
    }
    if wanted(8) {
        total += execute_day(8, day8, default_input)?;
    }
    if wanted(9) {
        total += execute_day(9, day9, default_input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day<S: Display, T: Display>(
    n: usize,
    f: fn(&str) -> Result<(S, T)>,
    input_loader: fn(usize) -> Result<String>,
) -> Result<Duration> {
    println!("Day {}:", n);
    let input = input_loader(n)?;

    let start = Instant::now();
    let (part1, part2) = f(&input).with_context(|| format!("solving day {}", n))?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
