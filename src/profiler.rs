use std::collections::HashMap;
use std::fmt;

/// Behavioral classification derived from an opponent's accumulated counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentType {
    Aggressive,
    Tight,
    Passive,
    Loose,
    Unknown,
}

impl fmt::Display for OpponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentType::Aggressive => write!(f, "Aggressive"),
            OpponentType::Tight => write!(f, "Tight"),
            OpponentType::Passive => write!(f, "Passive"),
            OpponentType::Loose => write!(f, "Loose"),
            OpponentType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// An action observed from an opponent, as reported by the table driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedAction {
    Raise,
    Fold,
    Check,
    Bet,
    Bluff,
}

#[derive(Debug, Clone)]
pub struct OpponentProfile {
    pub id: String,
    pub hands_played: u64,
    pub aggression_count: u64,
    pub passivity_count: u64,
    pub fold_count: u64,
    pub bluff_count: u64,
    pub bet_sizes: Vec<f64>,
    pub classification: OpponentType,
}

impl OpponentProfile {
    pub fn new(id: &str) -> Self {
        OpponentProfile {
            id: id.to_string(),
            hands_played: 0,
            aggression_count: 0,
            passivity_count: 0,
            fold_count: 0,
            bluff_count: 0,
            bet_sizes: Vec::new(),
            classification: OpponentType::Unknown,
        }
    }

    fn record(&mut self, action: ObservedAction, bet_size: Option<f64>) {
        self.hands_played += 1;

        match action {
            ObservedAction::Raise => self.aggression_count += 1,
            ObservedAction::Fold => self.fold_count += 1,
            ObservedAction::Check => self.passivity_count += 1,
            ObservedAction::Bluff => self.bluff_count += 1,
            ObservedAction::Bet => {
                if let Some(size) = bet_size {
                    self.bet_sizes.push(size);
                }
            }
        }

        self.classification = classify(self);
    }
}

/// Classification is a pure function of the counters: the first ratio over
/// 0.6 wins, in priority order Aggressive, Tight, Passive; anything else
/// with at least one hand on record is Loose.
pub fn classify(profile: &OpponentProfile) -> OpponentType {
    if profile.hands_played == 0 {
        return OpponentType::Unknown;
    }

    let hands = profile.hands_played as f64;
    let aggression = profile.aggression_count as f64 / hands;
    let folds = profile.fold_count as f64 / hands;
    let passivity = profile.passivity_count as f64 / hands;

    if aggression > 0.6 {
        OpponentType::Aggressive
    } else if folds > 0.6 {
        OpponentType::Tight
    } else if passivity > 0.6 {
        OpponentType::Passive
    } else {
        OpponentType::Loose
    }
}

/// Sole owner of all opponent profiles, keyed by opponent id. Profiles are
/// created on first observation and mutated only through [`observe`];
/// they are never deleted within a session.
///
/// [`observe`]: OpponentProfiler::observe
#[derive(Debug, Default)]
pub struct OpponentProfiler {
    profiles: HashMap<String, OpponentProfile>,
}

impl OpponentProfiler {
    pub fn new() -> Self {
        OpponentProfiler {
            profiles: HashMap::new(),
        }
    }

    pub fn observe(&mut self, id: &str, action: ObservedAction, bet_size: Option<f64>) {
        self.profiles
            .entry(id.to_string())
            .or_insert_with(|| OpponentProfile::new(id))
            .record(action, bet_size);
    }

    /// Snapshot of an opponent's profile. Unseen ids get a default Unknown
    /// profile; this lookup never fails.
    pub fn profile(&self, id: &str) -> OpponentProfile {
        self.profiles
            .get(id)
            .cloned()
            .unwrap_or_else(|| OpponentProfile::new(id))
    }

    pub fn opponent_type(&self, id: &str) -> OpponentType {
        self.profiles
            .get(id)
            .map(|p| p.classification)
            .unwrap_or(OpponentType::Unknown)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
