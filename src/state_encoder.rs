use crate::environment::GameState;

/// Deterministic fixed-length numeric view of a game state, identical in
/// shape across all betting rounds: 2 hole-card codes, 5 zero-padded
/// community slots, pot, outstanding bet, then stack / bet / active for each
/// opponent seat. Card codes come from [`crate::cards::Card::code`], the one
/// bijection shared across the crate.
#[derive(Debug, Clone, Copy)]
pub struct StateEncoder {
    num_players: usize,
}

impl StateEncoder {
    pub fn new(num_players: usize) -> StateEncoder {
        StateEncoder { num_players }
    }

    pub fn state_size(&self) -> usize {
        2 + 5 + 1 + 1 + 3 * (self.num_players - 1)
    }

    pub fn encode(&self, state: &GameState) -> Vec<f64> {
        let mut vector = Vec::with_capacity(self.state_size());

        for card in &state.hole {
            vector.push(f64::from(card.code()));
        }

        for slot in 0..5 {
            vector.push(
                state
                    .community
                    .get(slot)
                    .map(|c| f64::from(c.code()))
                    .unwrap_or(0.0),
            );
        }

        vector.push(state.pot);
        vector.push(state.outstanding_bet());

        for seat in 0..state.num_players() {
            if seat == state.agent_seat {
                continue;
            }
            vector.push(state.stacks[seat]);
            vector.push(state.bets[seat]);
            vector.push(if state.active[seat] { 1.0 } else { 0.0 });
        }

        vector
    }

    /// Discretized identifier for the tabular agent: the agent's hole cards
    /// (order-normalized), the betting round, and a coarse pot bucket packed
    /// into one integer. Two states with the same key share a value-table row.
    pub fn state_key(&self, state: &GameState) -> u64 {
        let a = u64::from(state.hole[0].code());
        let b = u64::from(state.hole[1].code());
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };

        let pot_bucket = ((state.pot / 25.0) as u64).min(99);

        hi * 1_000_000 + lo * 1_000 + state.round.index() * 100 + pot_bucket
    }
}
