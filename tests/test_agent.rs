use std::path::PathBuf;

use approx::assert_relative_eq;

use pokermind::agent::*;
use pokermind::exploration::EpsilonGreedy;

fn greedy_agent(alpha: f64, gamma: f64) -> TabularAgent {
    TabularAgent::new(alpha, gamma, Box::new(EpsilonGreedy::new(0.0, 0.0, 0.99, 1)))
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("pokermind-{}-{}", name, std::process::id()));
    path
}

#[test]
fn test_untouched_state_has_zero_values() {
    let agent = greedy_agent(0.1, 0.9);
    assert_eq!(agent.action_values(12345), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_update_moves_value_toward_target() {
    let mut agent = greedy_agent(0.5, 0.9);
    let t = Transition {
        state: 1,
        action: 1,
        reward: 10.0,
        next_state: 2,
        terminal: true,
    };
    agent.update(&t);
    // Next state is unvisited, so the target is exactly the reward.
    assert_relative_eq!(agent.action_values(1)[1], 5.0);
    agent.update(&t);
    assert_relative_eq!(agent.action_values(1)[1], 7.5);
}

#[test]
fn test_repeated_updates_converge_monotonically() {
    let mut agent = greedy_agent(0.25, 0.9);
    let t = Transition {
        state: 7,
        action: 2,
        reward: 4.0,
        next_state: 8,
        terminal: true,
    };

    let target = 4.0; // terminal next state bootstraps zero
    let mut last_error = f64::INFINITY;
    for _ in 0..50 {
        agent.update(&t);
        let error = (target - agent.action_values(7)[2]).abs();
        assert!(error < last_error, "TD error must shrink every step");
        last_error = error;
    }
    assert!(last_error < 1e-4);
}

#[test]
fn test_update_bootstraps_from_next_state() {
    let mut agent = greedy_agent(1.0, 0.5);
    // Give the next state a known best value.
    agent.update(&Transition {
        state: 2,
        action: 0,
        reward: 8.0,
        next_state: 99,
        terminal: true,
    });
    assert_relative_eq!(agent.action_values(2)[0], 8.0);

    // With alpha 1 the update lands exactly on reward + gamma * max(next).
    agent.update(&Transition {
        state: 1,
        action: 1,
        reward: 1.0,
        next_state: 2,
        terminal: false,
    });
    assert_relative_eq!(agent.action_values(1)[1], 1.0 + 0.5 * 8.0);
}

#[test]
fn test_greedy_agent_picks_learned_action() {
    let mut agent = greedy_agent(1.0, 0.9);
    agent.update(&Transition {
        state: 5,
        action: 2,
        reward: 3.0,
        next_state: 6,
        terminal: true,
    });
    for _ in 0..10 {
        assert_eq!(agent.choose_action(5), 2);
    }
}

#[test]
fn test_save_and_load_roundtrip() {
    let path = temp_path("roundtrip.json");

    let mut agent = greedy_agent(1.0, 0.9);
    agent.update(&Transition {
        state: 42,
        action: 1,
        reward: 2.5,
        next_state: 43,
        terminal: true,
    });
    agent.save(&path).unwrap();

    let mut restored = greedy_agent(1.0, 0.9);
    restored.load(&path).unwrap();
    assert_eq!(restored.action_values(42), agent.action_values(42));
    assert_eq!(restored.states_visited(), 1);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_missing_file_keeps_zeroed_table() {
    let mut agent = greedy_agent(0.1, 0.9);
    let path = temp_path("does-not-exist.json");
    assert!(agent.load(&path).is_ok());
    assert_eq!(agent.states_visited(), 0);
    assert_eq!(agent.action_values(1), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_load_corrupt_file_reinitializes() {
    let path = temp_path("corrupt.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut agent = greedy_agent(1.0, 0.9);
    agent.update(&Transition {
        state: 1,
        action: 0,
        reward: 1.0,
        next_state: 2,
        terminal: true,
    });
    assert!(agent.load(&path).is_ok());
    assert_eq!(agent.states_visited(), 0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_decay_epsilon_reaches_exploitation() {
    let mut agent = TabularAgent::new(
        1.0,
        0.9,
        Box::new(EpsilonGreedy::new(1.0, 0.0, 0.0, 1)),
    );
    agent.update(&Transition {
        state: 9,
        action: 0,
        reward: 5.0,
        next_state: 10,
        terminal: true,
    });

    // One decay with rate 0 drops epsilon straight to the floor.
    agent.decay_epsilon();
    for _ in 0..20 {
        assert_eq!(agent.choose_action(9), 0);
    }
}
