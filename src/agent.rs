use std::collections::HashMap;
use std::path::Path;

use crate::environment::Action;
use crate::error::PokerResult;
use crate::exploration::Exploration;

/// One learning step's worth of experience, consumed immediately by the
/// value update.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub state: u64,
    pub action: usize,
    pub reward: f64,
    pub next_state: u64,
    pub terminal: bool,
}

/// Common capability of decision-learning agents, so the tabular learner and
/// any future model-backed policy are interchangeable behind the orchestrator.
pub trait Agent {
    fn choose_action(&mut self, state: u64) -> usize;
    fn update(&mut self, transition: &Transition);
    fn decay_epsilon(&mut self);
}

const ALL_ACTIONS: [usize; Action::COUNT] = [0, 1, 2];

/// Tabular Q-learning over discretized state keys. The value table is owned
/// exclusively by this agent; rows materialize as zeros on first touch.
pub struct TabularAgent {
    table: HashMap<u64, Vec<f64>>,
    alpha: f64,
    gamma: f64,
    exploration: Box<dyn Exploration>,
}

impl TabularAgent {
    pub fn new(alpha: f64, gamma: f64, exploration: Box<dyn Exploration>) -> TabularAgent {
        TabularAgent {
            table: HashMap::new(),
            alpha,
            gamma,
            exploration,
        }
    }

    pub fn action_values(&self, state: u64) -> Vec<f64> {
        self.table
            .get(&state)
            .cloned()
            .unwrap_or_else(|| vec![0.0; Action::COUNT])
    }

    pub fn states_visited(&self) -> usize {
        self.table.len()
    }

    fn best_next_value(&self, state: u64) -> f64 {
        self.table
            .get(&state)
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .unwrap_or(0.0)
    }

    /// Persist the table as a flat JSON map from state key to action values.
    pub fn save(&self, path: &Path) -> PokerResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&self.table)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a previously saved table. A missing or unreadable file is not an
    /// error: the table simply stays at its zero-initialized state.
    pub fn load(&mut self, path: &Path) -> PokerResult<()> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Ok(()),
        };
        match serde_json::from_str(&json) {
            Ok(table) => self.table = table,
            Err(_) => self.table.clear(),
        }
        Ok(())
    }
}

impl Agent for TabularAgent {
    fn choose_action(&mut self, state: u64) -> usize {
        let values = self.action_values(state);
        self.exploration.select(&values, &ALL_ACTIONS)
    }

    /// Standard temporal-difference update:
    /// q(s, a) += alpha * (reward + gamma * max q(s') - q(s, a)).
    fn update(&mut self, t: &Transition) {
        let target = t.reward + self.gamma * self.best_next_value(t.next_state);
        let row = self
            .table
            .entry(t.state)
            .or_insert_with(|| vec![0.0; Action::COUNT]);
        row[t.action] += self.alpha * (target - row[t.action]);
    }

    fn decay_epsilon(&mut self) {
        self.exploration.decay();
    }
}
