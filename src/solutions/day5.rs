use anyhow::Result;

use crate::almanac::Almanac;

const SEED: &str = "seed";
const LOCATION: &str = "location";

pub fn day5(input: &str) -> Result<(u64, u64)> {
    let almanac: Almanac = input.parse()?;
    let graph = almanac.graph();

    let nearest = graph.resolve_minimum(&almanac.seed_singletons(), SEED, LOCATION)?;
    let nearest_of_ranges = graph.resolve_minimum(&almanac.seed_ranges()?, SEED, LOCATION)?;

    Ok((nearest, nearest_of_ranges))
}
