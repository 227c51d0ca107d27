use anyhow::{Context, Result};

/// Values right before and right after `sequence`, following its table of differences.
fn extrapolate(mut sequence: Vec<i64>) -> (i64, i64) {
    let mut previous = 0;
    let mut next = 0;
    let mut sign = 1;
    while sequence.iter().any(|&v| v != 0) {
        next += sequence[sequence.len() - 1];
        previous += sign * sequence[0];
        sign = -sign;
        sequence = sequence.windows(2).map(|w| w[1] - w[0]).collect();
    }
    (previous, next)
}

pub fn day9(input: &str) -> Result<(i64, i64)> {
    let mut sum_next = 0;
    let mut sum_previous = 0;

    for line in input.lines().filter(|line| !line.is_empty()) {
        let sequence = line
            .split_ascii_whitespace()
            .map(|n| n.parse::<i64>().with_context(|| format!("invalid number {:?}", n)))
            .collect::<Result<Vec<_>>>()?;
        let (previous, next) = extrapolate(sequence);
        sum_next += next;
        sum_previous += previous;
    }

    Ok((sum_next, sum_previous))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrapolates_both_ways() {
        assert_eq!(extrapolate(vec![0, 3, 6, 9, 12, 15]), (-3, 18));
        assert_eq!(extrapolate(vec![10, 13, 16, 21, 30, 45]), (5, 68));
        assert_eq!(extrapolate(vec![7]), (7, 7));
        assert_eq!(extrapolate(vec![0, 0]), (0, 0));
        assert_eq!(extrapolate(vec![]), (0, 0));
    }
}
