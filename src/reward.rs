use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome tag emitted toward external collaborators alongside the pot size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Fold,
    BluffSuccess,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
            Outcome::Fold => write!(f, "fold"),
            Outcome::BluffSuccess => write!(f, "bluff_success"),
        }
    }
}

/// Reward shaping for the learning loop. Wins and successful bluffs pay out,
/// losses and folds cost, and everything scales with the pot so higher-stakes
/// outcomes weigh more.
#[derive(Debug, Clone)]
pub struct RewardConfig {
    pub win_reward: f64,
    pub lose_penalty: f64,
    pub fold_penalty: f64,
    pub bluff_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            win_reward: 1.0,
            lose_penalty: 1.0,
            fold_penalty: 0.5,
            bluff_reward: 0.5,
        }
    }
}

impl RewardConfig {
    pub fn reward(&self, outcome: Outcome, pot_size: f64) -> f64 {
        let base = match outcome {
            Outcome::Win => self.win_reward,
            Outcome::Lose => -self.lose_penalty,
            Outcome::Fold => -self.fold_penalty,
            Outcome::BluffSuccess => self.bluff_reward,
        };
        base * (1.0 + pot_size / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_pays_and_loss_costs() {
        let rewards = RewardConfig::default();
        assert!(rewards.reward(Outcome::Win, 0.0) > 0.0);
        assert!(rewards.reward(Outcome::Lose, 0.0) < 0.0);
        assert!(rewards.reward(Outcome::Fold, 0.0) < 0.0);
        assert!(rewards.reward(Outcome::BluffSuccess, 0.0) > 0.0);
    }

    #[test]
    fn test_pot_scaling() {
        let rewards = RewardConfig::default();
        assert!((rewards.reward(Outcome::Win, 100.0) - 2.0).abs() < 1e-9);
        assert!((rewards.reward(Outcome::Fold, 100.0) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fold_costs_less_than_a_loss() {
        let rewards = RewardConfig::default();
        assert!(rewards.reward(Outcome::Fold, 50.0) > rewards.reward(Outcome::Lose, 50.0));
    }

    #[test]
    fn test_outcome_tags() {
        assert_eq!(format!("{}", Outcome::Win), "win");
        assert_eq!(format!("{}", Outcome::BluffSuccess), "bluff_success");
    }
}
