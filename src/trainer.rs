use colored::Colorize;

use crate::agent::{Agent, TabularAgent, Transition};
use crate::environment::{Action, PokerTable};
use crate::error::PokerResult;
use crate::state_encoder::StateEncoder;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub episodes: usize,
    pub max_steps: usize,
    pub log_interval: usize,
    /// Sizing applied whenever the agent's chosen action is a raise.
    pub raise_amount: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            episodes: 1000,
            max_steps: 100,
            log_interval: 100,
            raise_amount: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub episode_rewards: Vec<f64>,
    pub states_visited: usize,
}

impl TrainingReport {
    pub fn episodes(&self) -> usize {
        self.episode_rewards.len()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episode_rewards.is_empty() {
            return 0.0;
        }
        self.episode_rewards.iter().sum::<f64>() / self.episode_rewards.len() as f64
    }

    /// Mean over the trailing window, for a view of late-training behavior.
    pub fn tail_mean_reward(&self, window: usize) -> f64 {
        let n = self.episode_rewards.len();
        if n == 0 || window == 0 {
            return 0.0;
        }
        let tail = &self.episode_rewards[n.saturating_sub(window)..];
        tail.iter().sum::<f64>() / tail.len() as f64
    }
}

/// Run repeated episodes against the table, feeding every transition
/// straight into the agent's value update. The agent drives each seat in
/// turn, so terminal rewards always land on one of its own transitions.
/// Epsilon decays once per episode.
pub fn train(
    table: &mut PokerTable,
    agent: &mut TabularAgent,
    encoder: &StateEncoder,
    config: &TrainingConfig,
) -> PokerResult<TrainingReport> {
    let mut episode_rewards = Vec::with_capacity(config.episodes);

    for episode in 0..config.episodes {
        let mut state = table.reset()?;
        let mut total_reward = 0.0;

        for _ in 0..config.max_steps {
            let key = encoder.state_key(&state);
            let action_index = agent.choose_action(key);
            let action = Action::from_index(action_index, config.raise_amount)?;

            let (next_state, reward, done, _info) = table.step(action)?;
            agent.update(&Transition {
                state: key,
                action: action_index,
                reward,
                next_state: encoder.state_key(&next_state),
                terminal: done,
            });

            total_reward += reward;
            state = next_state;
            if done {
                break;
            }
        }

        agent.decay_epsilon();
        episode_rewards.push(total_reward);

        if config.log_interval > 0 && (episode + 1) % config.log_interval == 0 {
            let recent = &episode_rewards[episode + 1 - config.log_interval..];
            let mean = recent.iter().sum::<f64>() / recent.len() as f64;
            println!(
                "  episode {:>6} | mean reward {:>8.3} | states {}",
                (episode + 1).to_string().bold(),
                mean,
                agent.states_visited()
            );
        }
    }

    Ok(TrainingReport {
        episode_rewards,
        states_visited: agent.states_visited(),
    })
}
