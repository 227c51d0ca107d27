use anyhow::{anyhow, ensure, Context, Result};
use num::integer::{ExtendedGcd, Integer};
use regex::Regex;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Times at which a walker stands on an end node: hits before it starts looping, then hits that
/// repeat every `period` steps from `offset` on.
#[derive(Debug, PartialEq, Eq)]
struct Route {
    prefix_hits: Vec<u64>,
    offset: u64,
    period: u64,
    cycle_hits: Vec<u64>,
}

impl Route {
    fn first_hit(&self) -> Option<u64> {
        self.prefix_hits
            .first()
            .or_else(|| self.cycle_hits.first())
            .copied()
    }

    fn hits_at(&self, t: u64) -> bool {
        if t < self.offset {
            self.prefix_hits.contains(&t)
        } else {
            let phase = (t - self.offset) % self.period;
            self.cycle_hits.iter().any(|&hit| hit - self.offset == phase)
        }
    }
}

/// Solves `t = a (mod m)` and `t = b (mod n)` together.
fn crt(a: u64, m: u64, b: u64, n: u64) -> Option<(u64, u64)> {
    let (a, m, b, n) = (i128::from(a), i128::from(m), i128::from(b), i128::from(n));
    let ExtendedGcd { gcd, x, .. } = m.extended_gcd(&n);
    if (b - a) % gcd != 0 {
        return None;
    }
    let lcm = m.lcm(&n);
    let k = ((b - a) / gcd * x).rem_euclid(n / gcd);
    let t = (a + m * k).rem_euclid(lcm);
    Some((u64::try_from(t).ok()?, u64::try_from(lcm).ok()?))
}

/// Smallest `t >= min` with `t = residue (mod modulus)`.
fn lift(residue: u64, modulus: u64, min: u64) -> u64 {
    if residue >= min {
        residue
    } else {
        residue + (min - residue).div_ceil(modulus) * modulus
    }
}

struct Network<'a> {
    directions: Vec<Direction>,
    nodes: FxHashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let mut lines = input.lines().map(str::trim_end).filter(|line| !line.is_empty());

        let directions = lines
            .next()
            .context("missing directions")?
            .bytes()
            .map(|b| match b {
                b'L' => Ok(Direction::Left),
                b'R' => Ok(Direction::Right),
                _ => Err(anyhow!("invalid direction {:?}", b as char)),
            })
            .collect::<Result<Vec<_>>>()?;
        ensure!(!directions.is_empty(), "no directions");

        let re = Regex::new(r"^([0-9A-Z]{3}) = \(([0-9A-Z]{3}), ([0-9A-Z]{3})\)$")?;
        let mut nodes = FxHashMap::default();
        for line in lines {
            let (_, [node, left, right]) = re
                .captures(line)
                .with_context(|| format!("invalid node: {}", line))?
                .extract();
            nodes.insert(node, (left, right));
        }

        Ok(Self { directions, nodes })
    }

    fn step(&self, node: &'a str, direction: usize) -> Result<&'a str> {
        let &(left, right) = self
            .nodes
            .get(node)
            .with_context(|| format!("unknown node {}", node))?;
        Ok(match self.directions[direction] {
            Direction::Left => left,
            Direction::Right => right,
        })
    }

    /// Walks from `start` until a (direction index, node) state repeats.
    fn route(&self, start: &'a str, is_end: impl Fn(&str) -> bool) -> Result<Route> {
        let mut seen: FxHashMap<(usize, &str), u64> = FxHashMap::default();
        let mut hits = Vec::new();
        let mut node = start;
        let mut steps = 0u64;
        let mut direction = 0;
        loop {
            if let Some(&offset) = seen.get(&(direction, node)) {
                let (prefix_hits, cycle_hits) = hits.into_iter().partition(|&t| t < offset);
                return Ok(Route {
                    prefix_hits,
                    offset,
                    period: steps - offset,
                    cycle_hits,
                });
            }
            seen.insert((direction, node), steps);
            if is_end(node) {
                hits.push(steps);
            }
            node = self.step(node, direction)?;
            steps += 1;
            direction = (direction + 1) % self.directions.len();
        }
    }

    fn steps_to_zzz(&self) -> Result<u64> {
        self.route("AAA", |node| node == "ZZZ")?
            .first_hit()
            .context("ZZZ is unreachable from AAA")
    }

    /// Steps until every ghost stands on a node ending in `Z` at once.
    fn ghost_steps(&self) -> Result<u64> {
        let routes = self
            .nodes
            .keys()
            .filter(|node| node.ends_with('A'))
            .map(|&start| self.route(start, |node| node.ends_with('Z')))
            .collect::<Result<Vec<_>>>()?;
        ensure!(!routes.is_empty(), "no ghost starts on a node ending in `A`");

        // A meeting before some ghost loops must be one of that ghost's early hits.
        let early = routes
            .iter()
            .flat_map(|route| route.prefix_hits.iter().copied())
            .filter(|&t| routes.iter().all(|route| route.hits_at(t)))
            .min();
        if let Some(t) = early {
            return Ok(t);
        }

        let mut residues = vec![(0, 1)];
        for route in &routes {
            residues = residues
                .iter()
                .flat_map(|&(a, m)| {
                    route
                        .cycle_hits
                        .iter()
                        .filter_map(move |&hit| crt(a, m, hit % route.period, route.period))
                })
                .collect();
            residues.sort_unstable();
            residues.dedup();
        }

        let looping = routes.iter().map(|route| route.offset).max().unwrap_or(0);
        residues
            .into_iter()
            .map(|(residue, modulus)| lift(residue, modulus, looping))
            .min()
            .context("the ghosts never stand on end nodes at the same time")
    }
}

pub fn day8(input: &str) -> Result<(u64, u64)> {
    let network = Network::parse(input)?;
    Ok((network.steps_to_zzz()?, network.ghost_steps()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn ghosts_meet_at_the_common_multiple() {
        let input = indoc! {"
            LR

            11A = (11B, XXX)
            11B = (XXX, 11Z)
            11Z = (11B, XXX)
            22A = (22B, XXX)
            22B = (22C, 22C)
            22C = (22Z, 22Z)
            22Z = (22B, 22B)
            XXX = (XXX, XXX)
        "};
        let network = Network::parse(input).unwrap();
        assert_eq!(network.ghost_steps().unwrap(), 6);
        assert!(network.steps_to_zzz().is_err());

        assert_eq!(
            network.route("22A", |node| node.ends_with('Z')).unwrap(),
            Route {
                prefix_hits: vec![],
                offset: 1,
                period: 6,
                cycle_hits: vec![3, 6],
            }
        );
    }

    #[test]
    fn chinese_remainders() {
        assert_eq!(crt(0, 1, 2, 5), Some((2, 5)));
        assert_eq!(crt(2, 3, 3, 5), Some((8, 15)));
        assert_eq!(crt(0, 2, 0, 6), Some((0, 6)));
        assert_eq!(crt(0, 2, 3, 6), None);
        assert_eq!(lift(0, 6, 1), 6);
        assert_eq!(lift(8, 15, 3), 8);
        assert_eq!(lift(2, 5, 13), 17);
    }

    #[test]
    fn route_hits() {
        let route = Route {
            prefix_hits: vec![2],
            offset: 4,
            period: 3,
            cycle_hits: vec![5],
        };
        assert_eq!(route.first_hit(), Some(2));
        assert!(route.hits_at(2));
        assert!(!route.hits_at(3));
        assert!(route.hits_at(5));
        assert!(route.hits_at(8));
        assert!(!route.hits_at(9));
    }

    #[test]
    fn rejects_malformed_networks() {
        assert!(Network::parse("LX\n\nAAA = (BBB, CCC)\n").is_err());
        assert!(Network::parse("LR\n\nAAA -> BBB\n").is_err());
        assert!(Network::parse("").is_err());
    }
}
