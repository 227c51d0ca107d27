use anyhow::{ensure, Context, Result};
use memchr::memchr;
use rustc_hash::FxHashSet;

use crate::parse_u64_from_bytes;

fn numbers(s: &str) -> impl Iterator<Item = Result<u64>> + '_ {
    s.split_ascii_whitespace().map(|n| {
        parse_u64_from_bytes(n.as_bytes()).with_context(|| format!("invalid number {:?}", n))
    })
}

/// How many of the numbers we have are winning numbers.
fn card_matches(card: &str) -> Result<usize> {
    let colon = memchr(b':', card.as_bytes()).with_context(|| format!("no card id: {}", card))?;
    let bar = memchr(b'|', card.as_bytes()).with_context(|| format!("no `|`: {}", card))?;
    ensure!(colon < bar, "`|` before card id: {}", card);

    let winning = numbers(&card[colon + 1..bar]).collect::<Result<FxHashSet<_>>>()?;
    let mut matches = 0;
    for n in numbers(&card[bar + 1..]) {
        if winning.contains(&n?) {
            matches += 1;
        }
    }
    Ok(matches)
}

pub fn day4(input: &str) -> Result<(u64, u64)> {
    let matches = input
        .lines()
        .filter(|line| !line.is_empty())
        .map(card_matches)
        .collect::<Result<Vec<_>>>()?;

    let points = matches
        .iter()
        .filter(|&&m| m > 0)
        .map(|&m| 1u64 << (m - 1))
        .sum();

    // Won copies never run past the last card.
    let mut copies = vec![1u64; matches.len()];
    for (i, &m) in matches.iter().enumerate() {
        let held = copies[i];
        for won in copies.iter_mut().skip(i + 1).take(m) {
            *won += held;
        }
    }

    Ok((points, copies.iter().sum()))
}
