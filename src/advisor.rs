use std::fmt;
use std::time::Duration;

use crate::bluff::{BluffContext, BluffModel};
use crate::cards::{starting_hand, Card};
use crate::environment::BettingRound;
use crate::equity::simulate_equity_within;
use crate::error::PokerResult;
use crate::hand_evaluator::{evaluate_hand, normalized_strength};
use crate::odds::{expected_value, pot_odds, should_call};
use crate::preflop::{decide, PreflopAction, PreflopConfig, TablePosition};
use crate::profiler::OpponentType;

/// One decision request, as supplied by the external table driver.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub hole: [Card; 2],
    pub community: Vec<Card>,
    pub pot: f64,
    pub bet_to_call: f64,
    pub position: TablePosition,
    pub opponent: OpponentType,
    pub num_opponents: usize,
    pub round: BettingRound,
    /// Hero's recent aggression level in [0, 1], fed to the bluff model.
    pub aggression: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisedAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for AdvisedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisedAction::Fold => write!(f, "FOLD"),
            AdvisedAction::Check => write!(f, "CHECK"),
            AdvisedAction::Call => write!(f, "CALL"),
            AdvisedAction::Bet => write!(f, "BET"),
            AdvisedAction::Raise => write!(f, "RAISE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub action: AdvisedAction,
    pub sizing: f64,
    pub equity: f64,
    pub reasoning: String,
}

/// Reference orchestrator: merges the pre-flop rule table, hand evaluator,
/// equity simulator, pot odds, and bluff model into a single advised action.
/// Deterministic for a fixed seed.
pub struct Advisor {
    preflop: PreflopConfig,
    bluff: BluffModel,
    trials: usize,
    seed: u64,
    budget: Option<Duration>,
}

const STRONG_EQUITY: f64 = 0.65;
const RAISE_EQUITY: f64 = 0.80;
const BLUFF_THRESHOLD: f64 = 0.60;

impl Advisor {
    pub fn new(
        preflop: PreflopConfig,
        bluff: BluffModel,
        trials: usize,
        seed: u64,
        budget: Option<Duration>,
    ) -> Advisor {
        Advisor {
            preflop,
            bluff,
            trials,
            seed,
            budget,
        }
    }

    pub fn with_defaults(seed: u64) -> Advisor {
        Advisor::new(
            PreflopConfig::default(),
            BluffModel::default(),
            5000,
            seed,
            None,
        )
    }

    pub fn advise(&self, request: &DecisionRequest) -> PokerResult<Decision> {
        if request.round == BettingRound::PreFlop {
            self.advise_preflop(request)
        } else {
            self.advise_postflop(request)
        }
    }

    fn advise_preflop(&self, request: &DecisionRequest) -> PokerResult<Decision> {
        let hand = starting_hand(&request.hole)?;
        let pot_odds_ratio = if request.bet_to_call > 0.0 {
            request.pot / request.bet_to_call
        } else {
            f64::MAX
        };

        let action = decide(
            &self.preflop,
            &hand,
            request.position,
            request.opponent,
            pot_odds_ratio,
        );

        let (advised, sizing) = match action {
            PreflopAction::Raise => (AdvisedAction::Raise, self.raise_sizing(request)),
            PreflopAction::Call => (AdvisedAction::Call, request.bet_to_call),
            PreflopAction::Fold => (AdvisedAction::Fold, 0.0),
        };

        Ok(Decision {
            action: advised,
            sizing,
            equity: 0.0,
            reasoning: format!("{} from {} position by the opening chart", hand, request.position),
        })
    }

    fn advise_postflop(&self, request: &DecisionRequest) -> PokerResult<Decision> {
        let rank = evaluate_hand(&request.hole, &request.community)?;
        let strength = normalized_strength(&rank);

        let estimate = simulate_equity_within(
            &request.hole,
            request.num_opponents.max(1),
            &request.community,
            self.trials,
            self.seed,
            self.budget,
        )?;
        let equity = estimate.equity;

        let odds_fraction = if request.bet_to_call > 0.0 {
            request.bet_to_call / (request.pot + request.bet_to_call)
        } else {
            0.0
        };
        let bluff_probability = self.bluff.probability(&BluffContext {
            opponent: request.opponent,
            hand_strength: strength,
            pot_odds: odds_fraction,
            aggression: request.aggression,
            round: request.round,
        });

        if request.bet_to_call <= 0.0 {
            // Nothing to call: bet for value, bluff selectively, or check.
            if equity >= STRONG_EQUITY {
                return Ok(Decision {
                    action: AdvisedAction::Bet,
                    sizing: request.pot * 0.5,
                    equity,
                    reasoning: format!("{} with {:.0}% equity, betting for value", rank, equity * 100.0),
                });
            }
            if strength < 0.3 && bluff_probability >= BLUFF_THRESHOLD {
                return Ok(Decision {
                    action: AdvisedAction::Bet,
                    sizing: request.pot * 0.5,
                    equity,
                    reasoning: format!(
                        "bluff at {:.0}% probability vs {} opponent",
                        bluff_probability * 100.0,
                        request.opponent
                    ),
                });
            }
            return Ok(Decision {
                action: AdvisedAction::Check,
                sizing: 0.0,
                equity,
                reasoning: format!("{} too weak to bet, checking back", rank),
            });
        }

        let odds_percent = pot_odds(request.pot, request.bet_to_call)?;
        if should_call(request.pot, request.bet_to_call, equity * 100.0)? {
            let ev = expected_value(equity, request.pot, request.bet_to_call);
            if equity >= RAISE_EQUITY {
                return Ok(Decision {
                    action: AdvisedAction::Raise,
                    sizing: self.raise_sizing(request),
                    equity,
                    reasoning: format!("{} dominates, raising for value (EV {:+.2})", rank, ev),
                });
            }
            return Ok(Decision {
                action: AdvisedAction::Call,
                sizing: request.bet_to_call,
                equity,
                reasoning: format!(
                    "{:.0}% equity beats {:.0}% pot odds (EV {:+.2})",
                    equity * 100.0,
                    odds_percent,
                    ev
                ),
            });
        }

        // Semi-bluff only with live equity; pure air gives up.
        if bluff_probability >= BLUFF_THRESHOLD && equity * 100.0 >= odds_percent * 0.5 {
            return Ok(Decision {
                action: AdvisedAction::Raise,
                sizing: self.raise_sizing(request),
                equity,
                reasoning: format!(
                    "semi-bluff raise at {:.0}% bluff probability",
                    bluff_probability * 100.0
                ),
            });
        }

        Ok(Decision {
            action: AdvisedAction::Fold,
            sizing: 0.0,
            equity,
            reasoning: format!(
                "{:.0}% equity short of {:.0}% pot odds",
                equity * 100.0,
                odds_percent
            ),
        })
    }

    fn raise_sizing(&self, request: &DecisionRequest) -> f64 {
        (request.pot * 0.75).max(request.bet_to_call * 2.5).max(1.0)
    }
}
