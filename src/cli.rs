use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::advisor::{Advisor, DecisionRequest};
use crate::agent::TabularAgent;
use crate::cards::{parse_board, starting_hand, Card};
use crate::display::{
    board_display, equity_bar, equity_table, odds_table, print_error, styled_action,
    training_table,
};
use crate::environment::{BettingRound, PokerTable};
use crate::equity::simulate_equity_within;
use crate::error::{PokerError, PokerResult};
use crate::exploration::{EpsilonGreedy, Exploration, Softmax, Ucb};
use crate::odds::{expected_value, implied_odds, pot_odds};
use crate::preflop::TablePosition;
use crate::profiler::OpponentType;
use crate::state_encoder::StateEncoder;
use crate::trainer::{train, TrainingConfig};

#[derive(Parser)]
#[command(
    name = "pokermind",
    version = "1.0.0",
    about = "Poker decision core — equity, odds, advice, and Q-learning training."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum PositionArg {
    Early,
    Middle,
    Late,
}

impl PositionArg {
    fn to_position(&self) -> TablePosition {
        match self {
            PositionArg::Early => TablePosition::Early,
            PositionArg::Middle => TablePosition::Middle,
            PositionArg::Late => TablePosition::Late,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum TendencyArg {
    Aggressive,
    Tight,
    Passive,
    Loose,
    Unknown,
}

impl TendencyArg {
    fn to_type(&self) -> OpponentType {
        match self {
            TendencyArg::Aggressive => OpponentType::Aggressive,
            TendencyArg::Tight => OpponentType::Tight,
            TendencyArg::Passive => OpponentType::Passive,
            TendencyArg::Loose => OpponentType::Loose,
            TendencyArg::Unknown => OpponentType::Unknown,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum StrategyArg {
    EpsilonGreedy,
    Softmax,
    Ucb,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate win probability against random opponents
    Equity {
        /// Your hole cards (e.g., AhKs)
        hand: String,
        /// Number of opponents
        #[arg(short = 'n', long, default_value = "1")]
        opponents: usize,
        /// Board cards (e.g., Ks9d4c)
        #[arg(short, long)]
        board: Option<String>,
        /// Number of Monte Carlo trials
        #[arg(long, default_value = "30000")]
        sims: usize,
        /// RNG seed for reproducible runs
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Wall-clock budget in milliseconds (partial estimate if exceeded)
        #[arg(long)]
        budget_ms: Option<u64>,
    },
    /// Calculate pot odds, EV, and implied odds
    Odds {
        /// Current pot size
        pot: f64,
        /// Bet size to call
        bet: f64,
        /// Your equity (0-1) to calculate EV
        #[arg(short, long = "equity")]
        equity_val: Option<f64>,
        /// Expected future winnings for implied odds
        #[arg(short = 'i', long = "implied")]
        future: Option<f64>,
    },
    /// Full decision advice for a spot
    Advise {
        /// Your hole cards (e.g., AhKs)
        hand: String,
        /// Board cards (omit for preflop)
        #[arg(short, long)]
        board: Option<String>,
        /// Current pot size
        #[arg(long, default_value = "10")]
        pot: f64,
        /// Bet you are facing (0 = unopened)
        #[arg(long, default_value = "0")]
        bet: f64,
        /// Your table position
        #[arg(long, default_value = "middle")]
        position: PositionArg,
        /// Dominant opponent's tendency
        #[arg(long, default_value = "unknown")]
        opponent: TendencyArg,
        /// Number of opponents
        #[arg(short = 'n', long, default_value = "1")]
        opponents: usize,
        /// Your recent aggression level (0-1)
        #[arg(long, default_value = "0.5")]
        aggression: f64,
        /// Monte Carlo trials for the equity estimate
        #[arg(long, default_value = "5000")]
        sims: usize,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Train the tabular Q-learning agent by self-play episodes
    Train {
        /// Number of training episodes
        #[arg(long, default_value = "1000")]
        episodes: usize,
        /// Players at the table
        #[arg(long, default_value = "6")]
        players: usize,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Learning rate alpha
        #[arg(long, default_value = "0.1")]
        alpha: f64,
        /// Discount factor gamma
        #[arg(long, default_value = "0.95")]
        gamma: f64,
        /// Exploration strategy
        #[arg(long, default_value = "epsilon-greedy")]
        strategy: StrategyArg,
        /// Starting epsilon for epsilon-greedy
        #[arg(long, default_value = "1.0")]
        epsilon: f64,
        /// Epsilon floor
        #[arg(long, default_value = "0.05")]
        epsilon_floor: f64,
        /// Per-step epsilon decay rate
        #[arg(long, default_value = "0.995")]
        epsilon_decay: f64,
        /// Softmax temperature
        #[arg(long, default_value = "1.0")]
        temperature: f64,
        /// UCB exploration constant
        #[arg(long, default_value = "2.0")]
        ucb_c: f64,
        /// Value table path (loaded if present, saved after training)
        #[arg(long, default_value = "qtable.json")]
        table: PathBuf,
    },
}

pub fn run() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> PokerResult<()> {
    match command {
        Commands::Equity {
            hand,
            opponents,
            board,
            sims,
            seed,
            budget_ms,
        } => equity_command(&hand, opponents, board.as_deref(), sims, seed, budget_ms),
        Commands::Odds {
            pot,
            bet,
            equity_val,
            future,
        } => odds_command(pot, bet, equity_val, future),
        Commands::Advise {
            hand,
            board,
            pot,
            bet,
            position,
            opponent,
            opponents,
            aggression,
            sims,
            seed,
        } => advise_command(
            &hand,
            board.as_deref(),
            pot,
            bet,
            position.to_position(),
            opponent.to_type(),
            opponents,
            aggression,
            sims,
            seed,
        ),
        Commands::Train {
            episodes,
            players,
            seed,
            alpha,
            gamma,
            strategy,
            epsilon,
            epsilon_floor,
            epsilon_decay,
            temperature,
            ucb_c,
            table,
        } => train_command(
            episodes,
            players,
            seed,
            alpha,
            gamma,
            strategy,
            epsilon,
            epsilon_floor,
            epsilon_decay,
            temperature,
            ucb_c,
            &table,
        ),
    }
}

fn parse_hole(notation: &str) -> PokerResult<[Card; 2]> {
    let cards = parse_board(notation)?;
    if cards.len() != 2 || cards[0] == cards[1] {
        return Err(PokerError::InvalidHandSize);
    }
    Ok([cards[0], cards[1]])
}

fn round_for_board(board: &[Card]) -> PokerResult<BettingRound> {
    match board.len() {
        0 => Ok(BettingRound::PreFlop),
        3 => Ok(BettingRound::Flop),
        4 => Ok(BettingRound::Turn),
        5 => Ok(BettingRound::River),
        n => Err(PokerError::InvalidArgument(format!(
            "board must have 0, 3, 4 or 5 cards, got {}",
            n
        ))),
    }
}

fn equity_command(
    hand: &str,
    opponents: usize,
    board: Option<&str>,
    sims: usize,
    seed: u64,
    budget_ms: Option<u64>,
) -> PokerResult<()> {
    let hole = parse_hole(hand)?;
    let board_cards = board.map(parse_board).transpose()?.unwrap_or_default();
    let budget = budget_ms.map(Duration::from_millis);

    let estimate = simulate_equity_within(&hole, opponents, &board_cards, sims, seed, budget)?;

    println!(
        "\n{} vs {} opponent(s){}",
        starting_hand(&hole)?.bold(),
        opponents,
        if board_cards.is_empty() {
            String::new()
        } else {
            format!("  |  Board: {}", board_display(&board_cards))
        }
    );
    println!("  {}", equity_bar(estimate.equity, 30));
    println!("{}", equity_table(&estimate));
    Ok(())
}

fn odds_command(pot: f64, bet: f64, equity_val: Option<f64>, future: Option<f64>) -> PokerResult<()> {
    let odds = pot_odds(pot, bet)?;
    let ev = equity_val.map(|eq| expected_value(eq, pot, bet));

    println!("\n{}", odds_table(pot, bet, odds, ev));

    if let Some(eq) = equity_val {
        let profitable = eq * 100.0 >= odds;
        let verdict = if profitable { "CALL" } else { "FOLD" };
        println!(
            "  {:.0}% equity vs {:.1}% needed \u{2192} {}",
            eq * 100.0,
            odds,
            styled_action(verdict)
        );
    }

    if let Some(future_bets) = future {
        let implied = implied_odds(pot, bet, future_bets)?;
        println!(
            "  Implied odds with ${:.0} future value: {:.1}%",
            future_bets, implied
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn advise_command(
    hand: &str,
    board: Option<&str>,
    pot: f64,
    bet: f64,
    position: TablePosition,
    opponent: OpponentType,
    opponents: usize,
    aggression: f64,
    sims: usize,
    seed: u64,
) -> PokerResult<()> {
    let hole = parse_hole(hand)?;
    let community = board.map(parse_board).transpose()?.unwrap_or_default();
    let round = round_for_board(&community)?;

    let advisor = Advisor::new(
        Default::default(),
        Default::default(),
        sims,
        seed,
        None,
    );
    let decision = advisor.advise(&DecisionRequest {
        hole,
        community: community.clone(),
        pot,
        bet_to_call: bet,
        position,
        opponent,
        num_opponents: opponents,
        round,
        aggression,
    })?;

    println!(
        "\n{} ({})  |  Pot ${:.0}  |  Facing ${:.0}",
        starting_hand(&hole)?.bold(),
        round,
        pot,
        bet
    );
    if !community.is_empty() {
        println!("  Board: {}", board_display(&community));
    }
    if round != BettingRound::PreFlop {
        println!("  Equity: {}", equity_bar(decision.equity, 30));
    }
    let sizing = if decision.sizing > 0.0 {
        format!(" ${:.0}", decision.sizing)
    } else {
        String::new()
    };
    println!(
        "  \u{2192} {}{}",
        styled_action(&decision.action.to_string()),
        sizing
    );
    println!("  {}", decision.reasoning.dimmed());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn train_command(
    episodes: usize,
    players: usize,
    seed: u64,
    alpha: f64,
    gamma: f64,
    strategy: StrategyArg,
    epsilon: f64,
    epsilon_floor: f64,
    epsilon_decay: f64,
    temperature: f64,
    ucb_c: f64,
    table_path: &std::path::Path,
) -> PokerResult<()> {
    let exploration: Box<dyn Exploration> = match strategy {
        StrategyArg::EpsilonGreedy => Box::new(EpsilonGreedy::new(
            epsilon,
            epsilon_floor,
            epsilon_decay,
            seed,
        )),
        StrategyArg::Softmax => Box::new(Softmax::new(temperature, seed)),
        StrategyArg::Ucb => Box::new(Ucb::new(ucb_c, crate::environment::Action::COUNT)),
    };

    let mut agent = TabularAgent::new(alpha, gamma, exploration);
    agent.load(table_path)?;

    let mut table = PokerTable::new(players, 100.0, seed)?;
    let encoder = StateEncoder::new(players);
    let config = TrainingConfig {
        episodes,
        ..TrainingConfig::default()
    };

    println!(
        "\nTraining {} episodes at a {}-seat table (seed {})",
        episodes.to_string().bold(),
        players,
        seed
    );
    let report = train(&mut table, &mut agent, &encoder, &config)?;

    agent.save(table_path)?;
    println!("\n{}", training_table(&report));
    println!(
        "  Value table saved to {}",
        table_path.display().to_string().green()
    );
    Ok(())
}
