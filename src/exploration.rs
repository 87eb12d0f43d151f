use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// An action-selection policy over a row of action values. Strategies are
/// interchangeable; the agent holds exactly one at a time.
pub trait Exploration {
    /// Pick one of `available` (indices into `values`).
    fn select(&mut self, values: &[f64], available: &[usize]) -> usize;

    /// Per-episode decay hook; a no-op for strategies without a schedule.
    fn decay(&mut self) {}
}

fn argmax(values: &[f64], available: &[usize]) -> usize {
    let mut best = available[0];
    for &idx in available {
        if values[idx] > values[best] {
            best = idx;
        }
    }
    best
}

/// With probability epsilon explore uniformly, otherwise exploit the argmax.
/// Epsilon decays geometrically toward its floor after every selection.
pub struct EpsilonGreedy {
    epsilon: f64,
    floor: f64,
    decay_rate: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, floor: f64, decay_rate: f64, seed: u64) -> EpsilonGreedy {
        EpsilonGreedy {
            epsilon,
            floor,
            decay_rate,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Exploration for EpsilonGreedy {
    fn select(&mut self, values: &[f64], available: &[usize]) -> usize {
        let choice = if self.rng.gen::<f64>() < self.epsilon {
            *available
                .choose(&mut self.rng)
                .expect("available actions must not be empty")
        } else {
            argmax(values, available)
        };
        self.decay();
        choice
    }

    fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.decay_rate).max(self.floor);
    }
}

/// Sample actions with probability proportional to exp(value / temperature).
pub struct Softmax {
    temperature: f64,
    rng: StdRng,
}

impl Softmax {
    pub fn new(temperature: f64, seed: u64) -> Softmax {
        Softmax {
            temperature: temperature.max(f64::EPSILON),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Exploration for Softmax {
    fn select(&mut self, values: &[f64], available: &[usize]) -> usize {
        let top = available
            .iter()
            .map(|&i| values[i])
            .fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = available
            .iter()
            .map(|&i| ((values[i] - top) / self.temperature).exp())
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => available[dist.sample(&mut self.rng)],
            Err(_) => argmax(values, available),
        }
    }
}

/// Upper confidence bound: argmax of value plus an exploration bonus that
/// shrinks as an action's visit count grows.
pub struct Ucb {
    c: f64,
    total_steps: u64,
    counts: Vec<u64>,
}

impl Ucb {
    pub fn new(c: f64, num_actions: usize) -> Ucb {
        Ucb {
            c,
            total_steps: 0,
            counts: vec![0; num_actions],
        }
    }
}

impl Exploration for Ucb {
    fn select(&mut self, values: &[f64], available: &[usize]) -> usize {
        let ln_total = ((self.total_steps + 1) as f64).ln();

        let mut best = available[0];
        let mut best_score = f64::NEG_INFINITY;
        for &idx in available {
            let bonus = self.c * (ln_total / (self.counts[idx] + 1) as f64).sqrt();
            let score = values[idx] + bonus;
            if score > best_score {
                best_score = score;
                best = idx;
            }
        }

        self.counts[best] += 1;
        self.total_steps += 1;
        best
    }
}
