use std::time::Duration;

use approx::assert_relative_eq;

use pokermind::cards::*;
use pokermind::equity::*;

fn c(notation: &str) -> Card {
    parse_card(notation).unwrap()
}

#[test]
fn test_equity_in_unit_interval() {
    let result = simulate_equity(&[c("7h"), c("2c")], 3, &[], 2000, 11).unwrap();
    assert!(result.equity >= 0.0 && result.equity <= 1.0);
    assert_relative_eq!(result.win + result.tie + result.lose, 1.0, epsilon = 1e-9);
}

#[test]
fn test_aces_are_a_favorite_heads_up() {
    let result = simulate_equity(&[c("As"), c("Ah")], 1, &[], 10000, 42).unwrap();
    assert!(result.equity > 0.75);
}

#[test]
fn test_aces_fade_multiway() {
    let heads_up = simulate_equity(&[c("As"), c("Ah")], 1, &[], 10000, 42).unwrap();
    let five_way = simulate_equity(&[c("As"), c("Ah")], 5, &[], 10000, 42).unwrap();
    assert!(five_way.equity < heads_up.equity);
    assert!(five_way.equity > 0.40);
}

#[test]
fn test_set_on_board() {
    let board = parse_board("Ts9s2h").unwrap();
    let result = simulate_equity(&[c("Td"), c("Th")], 1, &board, 10000, 7).unwrap();
    assert!(result.equity > 0.70);
}

#[test]
fn test_fixed_seed_is_deterministic() {
    let a = simulate_equity(&[c("Qh"), c("Jh")], 2, &[], 5000, 123).unwrap();
    let b = simulate_equity(&[c("Qh"), c("Jh")], 2, &[], 5000, 123).unwrap();
    assert_eq!(a.equity, b.equity);
    assert_eq!(a.win, b.win);
    assert_eq!(a.trials, b.trials);
    assert!(!a.truncated);
}

#[test]
fn test_different_seeds_differ() {
    let a = simulate_equity(&[c("Qh"), c("Jh")], 2, &[], 5000, 1).unwrap();
    let b = simulate_equity(&[c("Qh"), c("Jh")], 2, &[], 5000, 2).unwrap();
    assert_ne!(a.equity, b.equity);
}

#[test]
fn test_full_board_locked_outcome() {
    // Board gives hero the nut flush; no runout cards remain to deal.
    let board = parse_board("Ks7s2s9d3h").unwrap();
    let result = simulate_equity(&[c("As"), c("Qs")], 1, &board, 500, 5).unwrap();
    assert!(result.equity > 0.99);
}

#[test]
fn test_zero_opponents_rejected() {
    assert!(simulate_equity(&[c("As"), c("Ah")], 0, &[], 100, 1).is_err());
}

#[test]
fn test_zero_trials_rejected() {
    assert!(simulate_equity(&[c("As"), c("Ah")], 1, &[], 0, 1).is_err());
}

#[test]
fn test_oversized_board_rejected() {
    let board = parse_board("Ks7s2s9d3hQc").unwrap();
    assert!(simulate_equity(&[c("As"), c("Ah")], 1, &board, 100, 1).is_err());
}

#[test]
fn test_too_many_opponents_exhausts_deck() {
    // 2 hole + 25 opponent hands would need 50 cards plus a 5-card runout.
    assert!(simulate_equity(&[c("As"), c("Ah")], 25, &[], 100, 1).is_err());
}

#[test]
fn test_exhausted_budget_returns_partial_estimate() {
    let result = simulate_equity_within(
        &[c("As"), c("Ah")],
        1,
        &[],
        100_000,
        1,
        Some(Duration::ZERO),
    )
    .unwrap();
    assert!(result.truncated);
    assert!(result.trials < 100_000);
    assert!(result.equity >= 0.0 && result.equity <= 1.0);
}

#[test]
fn test_generous_budget_completes() {
    let result = simulate_equity_within(
        &[c("As"), c("Ah")],
        1,
        &[],
        1000,
        1,
        Some(Duration::from_secs(60)),
    )
    .unwrap();
    assert!(!result.truncated);
    assert_eq!(result.trials, 1000);
}

#[test]
fn test_display_mentions_equity() {
    let result = simulate_equity(&[c("As"), c("Ah")], 1, &[], 500, 3).unwrap();
    let text = format!("{}", result);
    assert!(text.contains("equity"));
    assert!(text.contains("Win"));
}
