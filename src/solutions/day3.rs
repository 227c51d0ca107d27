use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

use crate::parse_u64_from_bytes;

fn is_symbol(cell: u8) -> bool {
    cell != b'.' && !cell.is_ascii_digit()
}

pub fn day3(input: &str) -> Result<(u64, u64)> {
    let grid: Vec<&[u8]> = input
        .lines()
        .map(str::as_bytes)
        .filter(|row| !row.is_empty())
        .collect();

    let mut part_sum = 0;
    // Part numbers adjacent to each `*`, keyed by its position.
    let mut gears: FxHashMap<(usize, usize), Vec<u64>> = FxHashMap::default();

    for (y, row) in grid.iter().enumerate() {
        let mut x = 0;
        while x < row.len() {
            if !row[x].is_ascii_digit() {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x].is_ascii_digit() {
                x += 1;
            }
            let number = parse_u64_from_bytes(&row[start..x])
                .with_context(|| format!("number too large in row {}", y + 1))?;

            let mut is_part = false;
            for (ny, neighbour_row) in grid
                .iter()
                .enumerate()
                .take(y + 2)
                .skip(y.saturating_sub(1))
            {
                let end = (x + 1).min(neighbour_row.len());
                for nx in start.saturating_sub(1)..end {
                    let cell = neighbour_row[nx];
                    if !is_symbol(cell) {
                        continue;
                    }
                    is_part = true;
                    if cell == b'*' {
                        gears.entry((ny, nx)).or_default().push(number);
                    }
                }
            }
            if is_part {
                part_sum += number;
            }
        }
    }

    let gear_ratios = gears
        .values()
        .filter(|parts| parts.len() == 2)
        .map(|parts| parts[0] * parts[1])
        .sum();

    Ok((part_sum, gear_ratios))
}
