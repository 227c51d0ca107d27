use anyhow::{ensure, Context, Result};

use crate::parse_u64_from_bytes;

/// Number of hold times `x` that beat the record, i.e. `x * (time - x) > record`.
fn winning_holds(time: u64, record: u64) -> u64 {
    let beats = |hold: u64| u128::from(hold) * u128::from(time - hold) > u128::from(record);

    // The distance peaks at `time / 2`.
    let peak = time / 2;
    if !beats(peak) {
        return 0;
    }

    // Lower root of x^2 - time * x + record; the float estimate only needs a nudge either way.
    let disc = (time as f64).powi(2) - 4.0 * record as f64;
    let mut lo = ((time as f64 - disc.max(0.0).sqrt()) / 2.0).floor().max(0.0) as u64;
    lo = lo.min(peak);
    while !beats(lo) {
        lo += 1;
    }
    while lo > 0 && beats(lo - 1) {
        lo -= 1;
    }

    // Winning holds are symmetric around the peak: `lo..=time - lo`.
    time - 2 * lo + 1
}

fn numbers(line: &str) -> Result<Vec<u64>> {
    line.split_ascii_whitespace()
        .map(|n| parse_u64_from_bytes(n.as_bytes()).with_context(|| format!("invalid number {:?}", n)))
        .collect()
}

/// Reads the line as one number, ignoring the kerning.
fn joined(line: &str) -> Result<u64> {
    let digits: Vec<u8> = line.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    parse_u64_from_bytes(&digits).with_context(|| format!("invalid number {:?}", line.trim()))
}

pub fn day6(input: &str) -> Result<(u64, u64)> {
    let mut lines = input.lines();
    let times = lines
        .next()
        .and_then(|line| line.strip_prefix("Time:"))
        .context("missing `Time:` line")?;
    let records = lines
        .next()
        .and_then(|line| line.strip_prefix("Distance:"))
        .context("missing `Distance:` line")?;

    let (times_list, records_list) = (numbers(times)?, numbers(records)?);
    ensure!(
        times_list.len() == records_list.len(),
        "{} race times but {} records",
        times_list.len(),
        records_list.len()
    );
    let margin = times_list
        .iter()
        .zip(&records_list)
        .map(|(&time, &record)| winning_holds(time, record))
        .product();

    let single_race = winning_holds(joined(times)?, joined(records)?);

    Ok((margin, single_race))
}
