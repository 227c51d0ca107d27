use std::str::FromStr;

use super::{AlmanacError, CategoryGraph, Interval, RangeRule, RangeSet, Stage};
use crate::parse_u64_from_bytes;

/// Seeds plus the stages of a parsed almanac.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    seeds: Vec<u64>,
    graph: CategoryGraph,
}

impl Almanac {
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    pub fn graph(&self) -> &CategoryGraph {
        &self.graph
    }

    /// Every seed number on its own.
    pub fn seed_singletons(&self) -> RangeSet {
        self.seeds.iter().copied().map(Interval::singleton).collect()
    }

    /// Seed numbers read as `start length` pairs.
    pub fn seed_ranges(&self) -> Result<RangeSet, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::UnpairedSeeds(self.seeds.len()));
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| Interval::from_start_len(pair[0], pair[1]))
            .collect()
    }
}

fn parse_numbers(s: &str) -> Result<Vec<u64>, AlmanacError> {
    s.split_ascii_whitespace()
        .map(|n| {
            parse_u64_from_bytes(n.as_bytes()).ok_or_else(|| AlmanacError::InvalidNumber(n.to_string()))
        })
        .collect()
}

fn parse_rule(line: &str) -> Result<RangeRule, AlmanacError> {
    match parse_numbers(line)?.as_slice() {
        &[target_start, source_start, len] => RangeRule::from_starts(target_start, source_start, len),
        _ => Err(AlmanacError::InvalidRuleLine(line.to_string())),
    }
}

fn parse_header(line: &str) -> Result<(&str, &str), AlmanacError> {
    let invalid = || AlmanacError::InvalidHeader(line.to_string());
    let name = line.strip_suffix("map:").ok_or_else(invalid)?.trim_end();
    let (source, target) = name.split_once("-to-").ok_or_else(invalid)?;
    let is_category = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    if !is_category(source) || !is_category(target) {
        return Err(invalid());
    }
    Ok((source, target))
}

impl FromStr for Almanac {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim_end).filter(|line| !line.is_empty());

        let seeds = lines
            .next()
            .and_then(|line| line.strip_prefix("seeds:"))
            .ok_or(AlmanacError::MissingSeeds)?;
        let seeds = parse_numbers(seeds)?;

        let mut graph = CategoryGraph::new();
        let mut current: Option<(&str, Stage)> = None;
        for line in lines {
            if line.ends_with(':') {
                let (source, target) = parse_header(line)?;
                if let Some((prev, stage)) = current.replace((source, Stage::new(target, Vec::new()))) {
                    graph.insert(prev, stage)?;
                }
            } else {
                let (_, stage) = current
                    .as_mut()
                    .ok_or_else(|| AlmanacError::InvalidRuleLine(line.to_string()))?;
                stage.rules.push(parse_rule(line)?);
            }
        }
        if let Some((source, stage)) = current {
            graph.insert(source, stage)?;
        }

        Ok(Self { seeds, graph })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    fn iv(lo: u64, hi: u64) -> Interval {
        Interval::new(lo, hi).unwrap()
    }

    #[test]
    fn parses_example() {
        let almanac: Almanac = EXAMPLE.parse().unwrap();
        assert_eq!(almanac.seeds(), &[79, 14, 55, 13]);
        assert_eq!(
            almanac.graph().categories().collect::<Vec<_>>(),
            vec!["seed", "soil", "fertilizer", "water", "light", "temperature", "humidity"]
        );

        let stage = almanac.graph().stage("seed").unwrap();
        assert_eq!(stage.target(), "soil");
        assert_eq!(
            stage.rules(),
            &[
                RangeRule::from_starts(50, 98, 2).unwrap(),
                RangeRule::from_starts(52, 50, 48).unwrap()
            ]
        );

        assert_eq!(
            almanac.seed_singletons().intervals(),
            &[iv(13, 13), iv(14, 14), iv(55, 55), iv(79, 79)]
        );
        assert_eq!(
            almanac.seed_ranges().unwrap().intervals(),
            &[iv(55, 67), iv(79, 92)]
        );
    }

    #[test]
    fn resolves_example_locations() {
        let almanac: Almanac = EXAMPLE.parse().unwrap();
        let graph = almanac.graph();
        assert_eq!(
            graph.resolve_minimum(&almanac.seed_singletons(), "seed", "location"),
            Ok(35)
        );
        assert_eq!(
            graph.resolve_minimum(&almanac.seed_ranges().unwrap(), "seed", "location"),
            Ok(46)
        );

        let locations = graph
            .resolve(&almanac.seed_singletons(), "seed", "location")
            .unwrap();
        assert_eq!(
            locations.intervals(),
            &[iv(35, 35), iv(43, 43), iv(82, 82), iv(86, 86)]
        );
    }

    #[test]
    fn tolerates_crlf() {
        let almanac: Almanac = EXAMPLE.replace('\n', "\r\n").parse().unwrap();
        assert_eq!(almanac.graph().len(), 7);
    }

    #[test]
    fn rejects_broken_input() {
        assert_eq!(
            "seed-to-soil map:\n1 2 3\n".parse::<Almanac>(),
            Err(AlmanacError::MissingSeeds)
        );
        assert_eq!("".parse::<Almanac>(), Err(AlmanacError::MissingSeeds));
        assert_eq!(
            "seeds: 1 x".parse::<Almanac>(),
            Err(AlmanacError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            "seeds: 1\n1 2 3\n".parse::<Almanac>(),
            Err(AlmanacError::InvalidRuleLine("1 2 3".to_string()))
        );
        assert_eq!(
            "seeds: 1\n\nseed to soil map:\n".parse::<Almanac>(),
            Err(AlmanacError::InvalidHeader("seed to soil map:".to_string()))
        );
        assert_eq!(
            "seeds: 1\n\nseed-to-soil map:\n1 2\n".parse::<Almanac>(),
            Err(AlmanacError::InvalidRuleLine("1 2".to_string()))
        );
        assert_eq!(
            "seeds: 1\n\nseed-to-soil map:\n1 2 0\n".parse::<Almanac>(),
            Err(AlmanacError::EmptyInterval { start: 2 })
        );
        assert_eq!(
            "seeds: 1\n\nseed-to-soil map:\n\nseed-to-water map:\n".parse::<Almanac>(),
            Err(AlmanacError::DuplicateCategory("seed".to_string()))
        );
    }

    #[test]
    fn odd_seed_count_has_no_ranges() {
        let almanac: Almanac = "seeds: 1 2 3".parse().unwrap();
        assert_eq!(almanac.seed_ranges(), Err(AlmanacError::UnpairedSeeds(3)));
        assert_eq!(almanac.seed_singletons().len(), 3);
        assert!(almanac.graph().is_empty());
    }
}
