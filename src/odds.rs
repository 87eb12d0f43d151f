use crate::error::{PokerError, PokerResult};

/// Pot odds as a percentage: the share of the final pot the caller puts in.
/// `pot_odds(100, 25)` is 20.0, so calling needs at least 20% equity.
pub fn pot_odds(pot: f64, bet_to_call: f64) -> PokerResult<f64> {
    if bet_to_call <= 0.0 {
        return Err(PokerError::InvalidArgument(
            "bet to call must be positive".to_string(),
        ));
    }
    Ok(bet_to_call / (pot + bet_to_call) * 100.0)
}

/// Calling is profitable when hand equity (percent) meets the pot odds.
pub fn should_call(pot: f64, bet_to_call: f64, equity_percent: f64) -> PokerResult<bool> {
    Ok(equity_percent >= pot_odds(pot, bet_to_call)?)
}

/// Pot odds discounted by bets expected to be won on later streets.
pub fn implied_odds(pot: f64, bet_to_call: f64, future_bet_estimate: f64) -> PokerResult<f64> {
    if bet_to_call <= 0.0 {
        return Err(PokerError::InvalidArgument(
            "bet to call must be positive".to_string(),
        ));
    }
    Ok(bet_to_call / (pot + future_bet_estimate + bet_to_call) * 100.0)
}

/// Expected value of a call: equity share of the won pot minus the lost bet.
pub fn expected_value(equity: f64, pot: f64, bet_to_call: f64) -> f64 {
    equity * (pot + bet_to_call) - (1.0 - equity) * bet_to_call
}
