use anyhow::{bail, Context, Result};

const BAG: [u32; 3] = [12, 13, 14];

/// Fewest cubes of each colour (red, green, blue) the game could have been played with.
fn fewest_cubes(draws: &str) -> Result<[u32; 3]> {
    let mut fewest = [0; 3];
    for cubes in draws.split(|c| c == ';' || c == ',') {
        let (count, colour) = cubes
            .trim()
            .split_once(' ')
            .with_context(|| format!("expected `<count> <colour>`, got {:?}", cubes))?;
        let slot = match colour {
            "red" => 0,
            "green" => 1,
            "blue" => 2,
            _ => bail!("unknown colour {:?}", colour),
        };
        let count: u32 = count.parse()?;
        fewest[slot] = fewest[slot].max(count);
    }
    Ok(fewest)
}

pub fn day2(input: &str) -> Result<(u32, u32)> {
    let mut possible = 0;
    let mut power = 0;

    for line in input.lines().filter(|line| !line.is_empty()) {
        let (game, draws) = line
            .strip_prefix("Game ")
            .and_then(|line| line.split_once(": "))
            .with_context(|| format!("invalid game: {}", line))?;
        let id: u32 = game.parse()?;
        let fewest = fewest_cubes(draws).with_context(|| format!("in game {}", id))?;

        if fewest.iter().zip(BAG).all(|(&needed, held)| needed <= held) {
            possible += id;
        }
        power += fewest.iter().product::<u32>();
    }

    Ok((possible, power))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewest_cubes_per_colour() {
        assert_eq!(
            fewest_cubes("1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red").unwrap(),
            [14, 3, 15]
        );
        assert!(fewest_cubes("3 purple").is_err());
        assert!(fewest_cubes("red").is_err());
    }
}
