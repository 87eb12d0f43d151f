use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck};
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::{evaluate_hand, HandRank};
use crate::reward::{Outcome, RewardConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BettingRound {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl BettingRound {
    pub fn index(self) -> u64 {
        match self {
            BettingRound::PreFlop => 0,
            BettingRound::Flop => 1,
            BettingRound::Turn => 2,
            BettingRound::River => 3,
            BettingRound::Showdown => 4,
        }
    }
}

impl fmt::Display for BettingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BettingRound::PreFlop => write!(f, "preflop"),
            BettingRound::Flop => write!(f, "flop"),
            BettingRound::Turn => write!(f, "turn"),
            BettingRound::River => write!(f, "river"),
            BettingRound::Showdown => write!(f, "showdown"),
        }
    }
}

/// An action applied to the acting seat. Raise carries its sizing explicitly;
/// there is no hidden randomness in bet amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Fold,
    Call,
    Raise(f64),
}

impl Action {
    pub const COUNT: usize = 3;

    /// Index into a value-table row.
    pub fn index(&self) -> usize {
        match self {
            Action::Fold => 0,
            Action::Call => 1,
            Action::Raise(_) => 2,
        }
    }

    pub fn from_index(index: usize, raise_amount: f64) -> PokerResult<Action> {
        match index {
            0 => Ok(Action::Fold),
            1 => Ok(Action::Call),
            2 => Ok(Action::Raise(raise_amount)),
            _ => Err(PokerError::InvalidArgument(format!(
                "action index {} out of range",
                index
            ))),
        }
    }
}

/// Read-only snapshot of the table, handed to encoders, advisors, and the
/// external table driver. Validated at construction: the pot always equals
/// the sum of bets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub hole: [Card; 2],
    pub community: Vec<Card>,
    pub pot: f64,
    pub bets: Vec<f64>,
    pub stacks: Vec<f64>,
    pub active: Vec<bool>,
    pub round: BettingRound,
    pub to_act: usize,
    pub agent_seat: usize,
}

impl GameState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hole: [Card; 2],
        community: Vec<Card>,
        pot: f64,
        bets: Vec<f64>,
        stacks: Vec<f64>,
        active: Vec<bool>,
        round: BettingRound,
        to_act: usize,
        agent_seat: usize,
    ) -> PokerResult<GameState> {
        let seats = bets.len();
        if community.len() > 5 {
            return Err(PokerError::InvalidArgument(format!(
                "{} community cards, maximum is 5",
                community.len()
            )));
        }
        if stacks.len() != seats || active.len() != seats {
            return Err(PokerError::InvalidArgument(
                "bets, stacks and active flags must cover the same seats".to_string(),
            ));
        }
        if to_act >= seats || agent_seat >= seats {
            return Err(PokerError::InvalidArgument(
                "seat index out of range".to_string(),
            ));
        }
        let staked: f64 = bets.iter().sum();
        if (pot - staked).abs() > 1e-6 {
            return Err(PokerError::InvalidArgument(format!(
                "pot {} does not match total bets {}",
                pot, staked
            )));
        }
        Ok(GameState {
            hole,
            community,
            pot,
            bets,
            stacks,
            active,
            round,
            to_act,
            agent_seat,
        })
    }

    pub fn num_players(&self) -> usize {
        self.bets.len()
    }

    /// Highest bet currently on the table.
    pub fn outstanding_bet(&self) -> f64 {
        self.bets.iter().copied().fold(0.0, f64::max)
    }
}

/// Terminal metadata for a step: the outcome signal exported to external
/// collaborators, plus the pot it was decided over.
#[derive(Debug, Clone)]
pub struct StepInfo {
    pub outcome: Option<Outcome>,
    pub pot: f64,
}

/// A turn-based betting state machine over one table of seats. Drives the
/// rounds PreFlop → Flop → Turn → River → Showdown, dealing community cards
/// between rounds and settling the pot with the hand evaluator.
///
/// Stepping is strictly synchronous: each `step` fully applies one action
/// before returning the resulting snapshot.
pub struct PokerTable {
    num_players: usize,
    starting_stack: f64,
    base_seed: u64,
    hands_dealt: u64,
    deck: Deck,
    hole_cards: Vec<[Card; 2]>,
    community: Vec<Card>,
    pot: f64,
    bets: Vec<f64>,
    stacks: Vec<f64>,
    active: Vec<bool>,
    round: BettingRound,
    to_act: usize,
    acted_this_round: usize,
    agent_seat: usize,
    done: bool,
    rewards: RewardConfig,
}

impl PokerTable {
    pub fn new(num_players: usize, starting_stack: f64, seed: u64) -> PokerResult<PokerTable> {
        if !(2..=9).contains(&num_players) {
            return Err(PokerError::InvalidArgument(format!(
                "table seats 2-9 players, got {}",
                num_players
            )));
        }
        if starting_stack <= 0.0 {
            return Err(PokerError::InvalidArgument(
                "starting stack must be positive".to_string(),
            ));
        }
        Ok(PokerTable {
            num_players,
            starting_stack,
            base_seed: seed,
            hands_dealt: 0,
            deck: Deck::new_shuffled(seed),
            hole_cards: Vec::new(),
            community: Vec::new(),
            pot: 0.0,
            bets: vec![0.0; num_players],
            stacks: vec![starting_stack; num_players],
            active: vec![true; num_players],
            round: BettingRound::PreFlop,
            to_act: 0,
            acted_this_round: 0,
            agent_seat: 0,
            done: true,
            rewards: RewardConfig::default(),
        })
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> PokerTable {
        self.rewards = rewards;
        self
    }

    pub fn agent_seat(&self) -> usize {
        self.agent_seat
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Start a new hand: reshuffle (advancing the seeded stream so every hand
    /// gets a distinct, reproducible deck), deal two hole cards per seat, and
    /// zero the pot and bets.
    pub fn reset(&mut self) -> PokerResult<GameState> {
        self.deck = Deck::new_shuffled(self.base_seed.wrapping_add(self.hands_dealt));
        self.hands_dealt += 1;

        self.hole_cards.clear();
        for _ in 0..self.num_players {
            let cards = self.deck.deal(2)?;
            self.hole_cards.push([cards[0], cards[1]]);
        }

        self.community.clear();
        self.pot = 0.0;
        self.bets = vec![0.0; self.num_players];
        self.stacks = vec![self.starting_stack; self.num_players];
        self.active = vec![true; self.num_players];
        self.round = BettingRound::PreFlop;
        self.to_act = 0;
        self.acted_this_round = 0;
        self.done = false;

        self.snapshot()
    }

    /// Apply one action for the acting seat and advance the machine. Returns
    /// the next snapshot, the shaped reward, the terminal flag, and the
    /// outcome signal when the hand ended this step.
    pub fn step(&mut self, action: Action) -> PokerResult<(GameState, f64, bool, StepInfo)> {
        if self.done {
            return Err(PokerError::InvalidArgument(
                "hand is over; reset the table first".to_string(),
            ));
        }

        let seat = self.to_act;
        let mut reward = 0.0;
        let mut outcome = None;

        match action {
            Action::Fold => {
                self.active[seat] = false;
                self.done = true;
                outcome = Some(Outcome::Fold);
                reward = self.rewards.reward(Outcome::Fold, self.pot);
            }
            Action::Call => {
                let owed = self.outstanding() - self.bets[seat];
                self.commit(seat, owed.max(0.0));
            }
            Action::Raise(amount) => {
                if amount <= 0.0 {
                    return Err(PokerError::InvalidArgument(
                        "raise amount must be positive".to_string(),
                    ));
                }
                let owed = self.outstanding() - self.bets[seat];
                self.commit(seat, (owed.max(0.0) + amount).min(self.stacks[seat]));
            }
        }

        if !self.done {
            self.acted_this_round += 1;
            self.to_act = (self.to_act + 1) % self.num_players;

            if self.acted_this_round == self.num_players {
                self.acted_this_round = 0;
                if let Some((settled_reward, settled_outcome)) = self.advance_round()? {
                    reward = settled_reward;
                    outcome = Some(settled_outcome);
                    self.done = true;
                }
            }
        }

        debug_assert!((self.pot - self.bets.iter().sum::<f64>()).abs() < 1e-6);

        let info = StepInfo {
            outcome,
            pot: self.pot,
        };
        Ok((self.snapshot()?, reward, self.done, info))
    }

    fn outstanding(&self) -> f64 {
        self.bets.iter().copied().fold(0.0, f64::max)
    }

    fn commit(&mut self, seat: usize, amount: f64) {
        let amount = amount.min(self.stacks[seat]);
        self.stacks[seat] -= amount;
        self.bets[seat] += amount;
        self.pot += amount;
    }

    fn advance_round(&mut self) -> PokerResult<Option<(f64, Outcome)>> {
        match self.round {
            BettingRound::PreFlop => {
                self.community.extend(self.deck.deal(3)?);
                self.round = BettingRound::Flop;
                Ok(None)
            }
            BettingRound::Flop => {
                self.community.extend(self.deck.deal(1)?);
                self.round = BettingRound::Turn;
                Ok(None)
            }
            BettingRound::Turn => {
                self.community.extend(self.deck.deal(1)?);
                self.round = BettingRound::River;
                Ok(None)
            }
            BettingRound::River => {
                self.round = BettingRound::Showdown;
                Ok(Some(self.showdown()?))
            }
            BettingRound::Showdown => Ok(None),
        }
    }

    /// Rank every remaining hand, award the pot to the best (ties split),
    /// and report the agent's outcome.
    fn showdown(&mut self) -> PokerResult<(f64, Outcome)> {
        let mut rankings: Vec<(usize, HandRank)> = Vec::new();
        for seat in 0..self.num_players {
            if self.active[seat] {
                let rank = evaluate_hand(&self.hole_cards[seat], &self.community)?;
                rankings.push((seat, rank));
            }
        }

        let best = rankings
            .iter()
            .map(|(_, r)| r.clone())
            .max()
            .ok_or_else(|| PokerError::InvalidArgument("no active hands at showdown".to_string()))?;

        let winners: Vec<usize> = rankings
            .iter()
            .filter(|(_, r)| *r == best)
            .map(|(seat, _)| *seat)
            .collect();

        let share = self.pot / winners.len() as f64;
        for &seat in &winners {
            self.stacks[seat] += share;
        }

        let outcome = if winners.contains(&self.agent_seat) {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        Ok((self.rewards.reward(outcome, self.pot), outcome))
    }

    pub fn snapshot(&self) -> PokerResult<GameState> {
        if self.hole_cards.len() != self.num_players {
            return Err(PokerError::InvalidArgument(
                "no hand in progress; reset the table first".to_string(),
            ));
        }
        GameState::new(
            self.hole_cards[self.agent_seat],
            self.community.clone(),
            self.pot,
            self.bets.clone(),
            self.stacks.clone(),
            self.active.clone(),
            self.round,
            self.to_act,
            self.agent_seat,
        )
    }
}
