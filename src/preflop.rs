use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::profiler::OpponentType;

/// Base scores for canonical starting hands. Anything not listed scores 0,
/// which biases unknown hands toward a fold.
static HAND_SCORES: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AA", 10);
    m.insert("KK", 9);
    m.insert("QQ", 9);
    m.insert("JJ", 8);
    m.insert("AKs", 8);
    m.insert("TT", 7);
    m.insert("AQs", 7);
    m.insert("AJs", 7);
    m.insert("KQs", 7);
    m.insert("AKo", 6);
    m.insert("99", 6);
    m.insert("88", 6);
    m.insert("AQo", 5);
    m.insert("ATs", 5);
    m.insert("KJs", 5);
    m.insert("QJs", 5);
    m.insert("JTs", 5);
    m.insert("77", 5);
    m.insert("66", 4);
    m.insert("55", 4);
    m.insert("44", 4);
    m.insert("A5s", 4);
    m.insert("A4s", 4);
    m.insert("A3s", 4);
    m.insert("A2s", 4);
    m.insert("KQo", 4);
    m.insert("T9s", 4);
    m.insert("98s", 4);
    m.insert("33", 3);
    m.insert("22", 3);
    m.insert("87s", 3);
    m.insert("76s", 3);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePosition {
    Early,
    Middle,
    Late,
}

impl TablePosition {
    /// Opening ranges tighten early and loosen late.
    pub fn adjustment(self) -> i32 {
        match self {
            TablePosition::Early => -1,
            TablePosition::Middle => 0,
            TablePosition::Late => 1,
        }
    }
}

impl fmt::Display for TablePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablePosition::Early => write!(f, "early"),
            TablePosition::Middle => write!(f, "middle"),
            TablePosition::Late => write!(f, "late"),
        }
    }
}

/// Play tighter into aggression, looser against passivity.
pub fn opponent_adjustment(opponent: OpponentType) -> i32 {
    match opponent {
        OpponentType::Aggressive => -1,
        OpponentType::Passive => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopAction {
    Raise,
    Call,
    Fold,
}

impl fmt::Display for PreflopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflopAction::Raise => write!(f, "RAISE"),
            PreflopAction::Call => write!(f, "CALL"),
            PreflopAction::Fold => write!(f, "FOLD"),
        }
    }
}

/// Decision thresholds, passed explicitly to keep the rule table free of
/// hidden state.
#[derive(Debug, Clone)]
pub struct PreflopConfig {
    pub raise_threshold: i32,
    pub call_threshold: i32,
    pub call_pot_odds_min: f64,
}

impl Default for PreflopConfig {
    fn default() -> Self {
        PreflopConfig {
            raise_threshold: 9,
            call_threshold: 5,
            call_pot_odds_min: 1.5,
        }
    }
}

pub fn hand_score(hand: &str) -> i32 {
    HAND_SCORES.get(hand).copied().unwrap_or(0)
}

/// Opening decision for a canonical starting hand ("AA", "AKs", "T9o"),
/// adjusted for position and the dominant opponent's tendency. The pot-odds
/// ratio (pot divided by the bet to call) gates marginal calls.
pub fn decide(
    config: &PreflopConfig,
    hand: &str,
    position: TablePosition,
    opponent: OpponentType,
    pot_odds_ratio: f64,
) -> PreflopAction {
    let adjusted = hand_score(hand) + position.adjustment() + opponent_adjustment(opponent);

    if adjusted >= config.raise_threshold {
        PreflopAction::Raise
    } else if adjusted >= config.call_threshold && pot_odds_ratio > config.call_pot_odds_min {
        PreflopAction::Call
    } else {
        PreflopAction::Fold
    }
}
