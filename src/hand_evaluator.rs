use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::cards::Card;
use crate::error::{PokerError, PokerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    /// Ordinal 1 (High Card) through 10 (Royal Flush).
    pub fn strength(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
            HandCategory::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// The ranking of a best 5-card hand: category, then a descending tiebreak
/// key of the ranks that matter (e.g. quad rank then kicker).
#[derive(Debug, Clone)]
pub struct HandRank {
    pub category: HandCategory,
    pub tiebreak: Vec<u8>,
    pub cards: Vec<Card>,
}

impl HandRank {
    pub fn new(category: HandCategory, tiebreak: Vec<u8>, cards: Vec<Card>) -> Self {
        HandRank {
            category,
            tiebreak,
            cards,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.tiebreak == other.tiebreak
    }
}

impl Eq for HandRank {}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.category.cmp(&other.category) {
            Ordering::Equal => self.tiebreak.cmp(&other.tiebreak),
            ord => ord,
        }
    }
}

fn is_flush(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

/// High card of a 5-card straight, if any. The wheel A-2-3-4-5 counts with
/// high card 5.
fn straight_high(values: &[u8]) -> Option<u8> {
    let unique: Vec<u8> = values
        .iter()
        .copied()
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .collect();

    if unique.len() < 5 {
        return None;
    }

    if unique[4] - unique[0] == 4 {
        return Some(unique[4]);
    }

    // Wheel
    if unique == [2, 3, 4, 5, 14] {
        return Some(5);
    }

    None
}

fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let flush = is_flush(cards);
    let straight = straight_high(&values);

    if flush {
        if let Some(high) = straight {
            if high == 14 {
                return HandRank::new(HandCategory::RoyalFlush, vec![14], cards.to_vec());
            }
            return HandRank::new(HandCategory::StraightFlush, vec![high], cards.to_vec());
        }
    }

    // Per-rank counts, never raw card-string matches.
    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }

    // Frequency list sorted by count desc, then rank desc.
    let mut freq: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    freq.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    if freq[0].0 == 4 {
        let quad = freq[0].1;
        let kicker = values.iter().copied().find(|&v| v != quad).unwrap_or(0);
        return HandRank::new(HandCategory::FourOfAKind, vec![quad, kicker], cards.to_vec());
    }

    if freq[0].0 == 3 && freq[1].0 == 2 {
        return HandRank::new(
            HandCategory::FullHouse,
            vec![freq[0].1, freq[1].1],
            cards.to_vec(),
        );
    }

    if flush {
        return HandRank::new(HandCategory::Flush, values, cards.to_vec());
    }

    if let Some(high) = straight {
        return HandRank::new(HandCategory::Straight, vec![high], cards.to_vec());
    }

    if freq[0].0 == 3 {
        let trips = freq[0].1;
        let mut tiebreak = vec![trips];
        tiebreak.extend(values.iter().copied().filter(|&v| v != trips));
        return HandRank::new(HandCategory::ThreeOfAKind, tiebreak, cards.to_vec());
    }

    let pairs: Vec<u8> = freq
        .iter()
        .filter(|&&(count, _)| count == 2)
        .map(|&(_, v)| v)
        .collect();

    if pairs.len() == 2 {
        let kicker = values
            .iter()
            .copied()
            .find(|v| !pairs.contains(v))
            .unwrap_or(0);
        return HandRank::new(
            HandCategory::TwoPair,
            vec![pairs[0], pairs[1], kicker],
            cards.to_vec(),
        );
    }

    if pairs.len() == 1 {
        let pair = pairs[0];
        let mut tiebreak = vec![pair];
        tiebreak.extend(values.iter().copied().filter(|&v| v != pair));
        return HandRank::new(HandCategory::OnePair, tiebreak, cards.to_vec());
    }

    HandRank::new(HandCategory::HighCard, values, cards.to_vec())
}

/// Best 5-card ranking from hole cards plus board (up to 7 cards total).
/// Pure and invariant under any permutation of the inputs.
pub fn evaluate_hand(hole_cards: &[Card], board: &[Card]) -> PokerResult<HandRank> {
    let mut all_cards: Vec<Card> = Vec::with_capacity(hole_cards.len() + board.len());
    all_cards.extend_from_slice(hole_cards);
    all_cards.extend_from_slice(board);

    if all_cards.len() < 5 {
        return Err(PokerError::NotEnoughCards {
            need: 5,
            got: all_cards.len(),
        });
    }

    let mut best: Option<HandRank> = None;
    for combo in all_cards.iter().combinations(5) {
        let five: [Card; 5] = [*combo[0], *combo[1], *combo[2], *combo[3], *combo[4]];
        let result = evaluate_five(&five);
        if best.as_ref().map_or(true, |b| result > *b) {
            best = Some(result);
        }
    }

    Ok(best.expect("at least one 5-card combination"))
}

/// Normalized strength of a ranking in [0, 1] (High Card 0.0, Royal Flush 1.0).
pub fn normalized_strength(rank: &HandRank) -> f64 {
    f64::from(rank.category.strength() - 1) / 9.0
}

pub fn compare_hands(hand1: &[Card], hand2: &[Card], board: &[Card]) -> PokerResult<i32> {
    let r1 = evaluate_hand(hand1, board)?;
    let r2 = evaluate_hand(hand2, board)?;
    Ok(match r1.cmp(&r2) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    })
}
