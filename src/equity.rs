use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::cards::{full_deck_cards, Card};
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::evaluate_hand;

const TRIAL_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct EquityEstimate {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    /// Win probability with split pots counted as fractional wins.
    pub equity: f64,
    /// Trials actually completed (may be fewer than requested under a budget).
    pub trials: usize,
    /// Set when a time budget cut the run short and this is a partial estimate.
    pub truncated: bool,
}

impl fmt::Display for EquityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%, {} trials{})",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0,
            self.equity * 100.0,
            self.trials,
            if self.truncated { ", truncated" } else { "" },
        )
    }
}

fn remaining_deck(dead: &[Card]) -> PokerResult<Vec<Card>> {
    let dead_set: std::collections::HashSet<Card> = dead.iter().copied().collect();
    if dead_set.len() != dead.len() {
        return Err(PokerError::InvalidArgument(
            "duplicate card across hole and board".to_string(),
        ));
    }
    Ok(full_deck_cards()
        .into_iter()
        .filter(|c| !dead_set.contains(c))
        .collect())
}

/// Monte Carlo estimate of win probability for the hero's hole cards against
/// `num_opponents` random hands, given any already-visible board cards.
///
/// Trials are independent: each derives its own RNG stream from the seed and
/// its trial index, so results are identical for a fixed seed and trial count
/// no matter how the rayon pool schedules them.
pub fn simulate_equity(
    hole: &[Card],
    num_opponents: usize,
    board: &[Card],
    trials: usize,
    seed: u64,
) -> PokerResult<EquityEstimate> {
    simulate_equity_within(hole, num_opponents, board, trials, seed, None)
}

/// As [`simulate_equity`], but stops dealing new trials once `budget` has
/// elapsed and returns the partial estimate with `truncated` set.
pub fn simulate_equity_within(
    hole: &[Card],
    num_opponents: usize,
    board: &[Card],
    trials: usize,
    seed: u64,
    budget: Option<Duration>,
) -> PokerResult<EquityEstimate> {
    if hole.len() != 2 {
        return Err(PokerError::InvalidHandSize);
    }
    if num_opponents == 0 {
        return Err(PokerError::InvalidArgument(
            "need at least one opponent".to_string(),
        ));
    }
    if board.len() > 5 {
        return Err(PokerError::InvalidArgument(format!(
            "board has {} cards, maximum is 5",
            board.len()
        )));
    }
    if trials == 0 {
        return Err(PokerError::InvalidArgument(
            "trial count must be positive".to_string(),
        ));
    }

    let mut dead: Vec<Card> = Vec::with_capacity(2 + board.len());
    dead.extend_from_slice(hole);
    dead.extend_from_slice(board);
    let remaining = remaining_deck(&dead)?;

    let runout_len = 5 - board.len();
    let needed = 2 * num_opponents + runout_len;
    if needed > remaining.len() {
        return Err(PokerError::DeckExhausted {
            requested: needed,
            available: remaining.len(),
        });
    }

    let deadline = budget.map(|b| Instant::now() + b);
    let hero: Vec<Card> = hole.to_vec();
    let board_vec: Vec<Card> = board.to_vec();

    // Each trial yields (win, tie, lose, tie_share); the sole shared step is
    // the final reduction.
    let (wins, ties, losses, tie_shares) = (0..trials)
        .into_par_iter()
        .filter_map(|trial| {
            if let Some(d) = deadline {
                if Instant::now() >= d {
                    return None;
                }
            }

            let mut rng =
                StdRng::seed_from_u64(seed ^ (trial as u64).wrapping_mul(TRIAL_SEED_MIX));
            let mut deck = remaining.clone();
            deck.shuffle(&mut rng);

            let mut full_board = board_vec.clone();
            full_board.extend_from_slice(&deck[2 * num_opponents..2 * num_opponents + runout_len]);

            let hero_rank = evaluate_hand(&hero, &full_board).ok()?;

            let mut beaten = false;
            let mut tied_with = 0usize;
            for opp in 0..num_opponents {
                let villain = &deck[2 * opp..2 * opp + 2];
                let villain_rank = evaluate_hand(villain, &full_board).ok()?;
                match hero_rank.cmp(&villain_rank) {
                    std::cmp::Ordering::Less => {
                        beaten = true;
                        break;
                    }
                    std::cmp::Ordering::Equal => tied_with += 1,
                    std::cmp::Ordering::Greater => {}
                }
            }

            Some(if beaten {
                (0u64, 0u64, 1u64, 0.0f64)
            } else if tied_with > 0 {
                (0, 1, 0, 1.0 / (tied_with + 1) as f64)
            } else {
                (1, 0, 0, 0.0)
            })
        })
        .reduce(
            || (0u64, 0u64, 0u64, 0.0f64),
            |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2, a.3 + b.3),
        );

    let completed = (wins + ties + losses) as usize;
    let total = completed.max(1) as f64;

    Ok(EquityEstimate {
        win: wins as f64 / total,
        tie: ties as f64 / total,
        lose: losses as f64 / total,
        equity: (wins as f64 + tie_shares) / total,
        trials: completed,
        truncated: completed < trials,
    })
}
