use aho_corasick::AhoCorasick;
use anyhow::Result;

// Pattern index `i` stands for the digit `i % 9 + 1`; the first nine are literal digits.
const DIGITS: [&str; 18] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine",
];

fn calibration(first: Option<usize>, last: Option<usize>) -> usize {
    first.zip(last).map_or(0, |(first, last)| first * 10 + last)
}

pub fn day1(input: &str) -> Result<(usize, usize)> {
    // Spelled out digits may share letters ("eightwo"), so matches have to overlap.
    let ac = AhoCorasick::new(DIGITS)?;

    let mut sum_part1 = 0;
    let mut sum_part2 = 0;
    for line in input.lines() {
        let (mut first_part1, mut last_part1) = (None, None);
        let (mut first_part2, mut last_part2) = (None, None);

        for mat in ac.find_overlapping_iter(line) {
            let pattern = mat.pattern().as_usize();
            let digit = pattern % 9 + 1;
            if pattern < 9 {
                first_part1.get_or_insert(digit);
                last_part1 = Some(digit);
            }
            first_part2.get_or_insert(digit);
            last_part2 = Some(digit);
        }

        sum_part1 += calibration(first_part1, last_part1);
        sum_part2 += calibration(first_part2, last_part2);
    }

    Ok((sum_part1, sum_part2))
}
