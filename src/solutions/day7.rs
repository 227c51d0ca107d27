use anyhow::{ensure, Context, Result};
use memchr::memchr;

use crate::parse_u64_from_bytes;

/// Card labels from weakest to strongest.
const CARDS: &[u8; 13] = b"23456789TJQKA";
/// Jokers are the weakest card but count as whatever makes the best hand type.
const CARDS_WITH_JOKERS: &[u8; 13] = b"J23456789TQKA";

/// Sort key of a hand: the hand type in the high bits, then every card's strength in hand order.
fn hand_key(hand: &[u8], jokers: bool) -> Result<u32> {
    ensure!(hand.len() == 5, "hand must have 5 cards, got {}", hand.len());
    let order = if jokers { CARDS_WITH_JOKERS } else { CARDS };

    let mut counts = [0u8; 13];
    let mut joker_count = 0;
    let mut key = 0u32;
    for &card in hand {
        let strength = memchr(card, order)
            .with_context(|| format!("unknown card {:?}", card as char))?;
        key = (key << 4) | strength as u32;
        if jokers && card == b'J' {
            joker_count += 1;
        } else {
            counts[strength] += 1;
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));

    // Five of a kind = 10, four = 9, full house = 8, three = 7, two pair = 6, pair = 5, high = 3.
    let hand_type = 2 * u32::from(counts[0] + joker_count) + u32::from(counts[1]);
    Ok((hand_type << 20) | key)
}

fn total_winnings(hands: &[(&[u8], u64)], jokers: bool) -> Result<u64> {
    let mut ranked = hands
        .iter()
        .map(|&(hand, bid)| -> Result<(u32, u64)> { Ok((hand_key(hand, jokers)?, bid)) })
        .collect::<Result<Vec<_>>>()?;
    ranked.sort_unstable();
    Ok(ranked.iter().zip(1..).map(|(&(_, bid), rank)| rank * bid).sum())
}

fn parse_hand(line: &str) -> Result<(&[u8], u64)> {
    let (hand, bid) = line
        .split_once(' ')
        .with_context(|| format!("expected `<hand> <bid>`, got {:?}", line))?;
    let bid = parse_u64_from_bytes(bid.trim().as_bytes())
        .with_context(|| format!("invalid bid {:?}", bid))?;
    Ok((hand.as_bytes(), bid))
}

pub fn day7(input: &str) -> Result<(u64, u64)> {
    let hands = input
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_hand)
        .collect::<Result<Vec<_>>>()?;

    Ok((total_winnings(&hands, false)?, total_winnings(&hands, true)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_type(hand: &str, jokers: bool) -> u32 {
        hand_key(hand.as_bytes(), jokers).unwrap() >> 20
    }

    #[test]
    fn hand_types() {
        assert_eq!(hand_type("AAAAA", false), 10);
        assert_eq!(hand_type("AA8AA", false), 9);
        assert_eq!(hand_type("23332", false), 8);
        assert_eq!(hand_type("TTT98", false), 7);
        assert_eq!(hand_type("23432", false), 6);
        assert_eq!(hand_type("A23A4", false), 5);
        assert_eq!(hand_type("23456", false), 3);
    }

    #[test]
    fn jokers_take_the_best_type() {
        assert_eq!(hand_type("KTJJT", false), 6);
        assert_eq!(hand_type("KTJJT", true), 9);
        assert_eq!(hand_type("JJJJJ", true), 10);
        assert_eq!(hand_type("2345J", true), 5);
    }

    #[test]
    fn ties_are_broken_by_the_first_differing_card() {
        let key = |hand: &str, jokers| hand_key(hand.as_bytes(), jokers).unwrap();
        assert!(key("33332", false) > key("2AAAA", false));
        assert!(key("77888", false) > key("77788", false));
        assert!(key("QQQQ2", true) > key("JKKK2", true));
    }

    #[test]
    fn rejects_malformed_hands() {
        assert!(hand_key(b"AAAA", false).is_err());
        assert!(hand_key(b"AAAAX", false).is_err());
    }
}
