use pokermind::agent::TabularAgent;
use pokermind::environment::PokerTable;
use pokermind::exploration::EpsilonGreedy;
use pokermind::state_encoder::StateEncoder;
use pokermind::trainer::*;

fn training_setup(players: usize, seed: u64) -> (PokerTable, TabularAgent, StateEncoder) {
    let table = PokerTable::new(players, 100.0, seed).unwrap();
    let agent = TabularAgent::new(
        0.1,
        0.95,
        Box::new(EpsilonGreedy::new(1.0, 0.05, 0.995, seed)),
    );
    let encoder = StateEncoder::new(players);
    (table, agent, encoder)
}

#[test]
fn test_training_runs_all_episodes() {
    let (mut table, mut agent, encoder) = training_setup(2, 42);
    let config = TrainingConfig {
        episodes: 50,
        max_steps: 100,
        log_interval: 0,
        raise_amount: 10.0,
    };

    let report = train(&mut table, &mut agent, &encoder, &config).unwrap();
    assert_eq!(report.episodes(), 50);
    assert_eq!(report.episode_rewards.len(), 50);
}

#[test]
fn test_training_populates_the_value_table() {
    let (mut table, mut agent, encoder) = training_setup(3, 7);
    let config = TrainingConfig {
        episodes: 100,
        max_steps: 100,
        log_interval: 0,
        raise_amount: 10.0,
    };

    let report = train(&mut table, &mut agent, &encoder, &config).unwrap();
    assert!(report.states_visited > 0);
    assert_eq!(report.states_visited, agent.states_visited());
}

#[test]
fn test_training_is_reproducible() {
    let config = TrainingConfig {
        episodes: 30,
        max_steps: 100,
        log_interval: 0,
        raise_amount: 10.0,
    };

    let (mut table_a, mut agent_a, encoder_a) = training_setup(2, 123);
    let report_a = train(&mut table_a, &mut agent_a, &encoder_a, &config).unwrap();

    let (mut table_b, mut agent_b, encoder_b) = training_setup(2, 123);
    let report_b = train(&mut table_b, &mut agent_b, &encoder_b, &config).unwrap();

    assert_eq!(report_a.episode_rewards, report_b.episode_rewards);
}

#[test]
fn test_every_episode_terminates() {
    // Max steps is generous; every hand must still end by fold or showdown,
    // so each episode's reward is finite and the loop never stalls.
    let (mut table, mut agent, encoder) = training_setup(6, 99);
    let config = TrainingConfig {
        episodes: 20,
        max_steps: 1000,
        log_interval: 0,
        raise_amount: 5.0,
    };

    let report = train(&mut table, &mut agent, &encoder, &config).unwrap();
    assert!(report.episode_rewards.iter().all(|r| r.is_finite()));
}

#[test]
fn test_report_statistics() {
    let report = TrainingReport {
        episode_rewards: vec![1.0, -1.0, 2.0, 0.0],
        states_visited: 4,
    };
    assert_eq!(report.episodes(), 4);
    assert!((report.mean_reward() - 0.5).abs() < 1e-9);
    assert!((report.tail_mean_reward(2) - 1.0).abs() < 1e-9);
    assert!((report.tail_mean_reward(100) - 0.5).abs() < 1e-9);
}
