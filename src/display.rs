use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::equity::EquityEstimate;
use crate::trainer::TrainingReport;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = (equity * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width.saturating_sub(filled));
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn board_display(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| {
            let text = format!("{}{}", card.rank.to_char(), card.suit.symbol());
            match card.suit {
                Suit::Spades => text.white().to_string(),
                Suit::Hearts => text.red().to_string(),
                Suit::Diamonds => text.blue().to_string(),
                Suit::Clubs => text.green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn styled_action(action: &str) -> String {
    let upper = action.to_uppercase();
    if upper.starts_with("RAISE") || upper.starts_with("BET") {
        upper.red().bold().to_string()
    } else if upper == "CALL" {
        upper.green().bold().to_string()
    } else if upper == "FOLD" {
        upper.dimmed().bold().to_string()
    } else if upper.contains("CHECK") {
        upper.yellow().bold().to_string()
    } else {
        upper.bold().to_string()
    }
}

pub fn equity_table(estimate: &EquityEstimate) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    table.add_row(vec![
        Cell::new("Win".bold().to_string()),
        Cell::new(format!("{:.1}%", estimate.win * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Tie".bold().to_string()),
        Cell::new(format!("{:.1}%", estimate.tie * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Lose".bold().to_string()),
        Cell::new(format!("{:.1}%", estimate.lose * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Equity".bold().to_string()),
        Cell::new(format!("{:.1}%", estimate.equity * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Trials".bold().to_string()),
        Cell::new(if estimate.truncated {
            format!("{} (truncated)", estimate.trials)
        } else {
            format!("{}", estimate.trials)
        }),
    ]);

    table.to_string()
}

pub fn odds_table(pot: f64, bet: f64, pot_odds_pct: f64, ev: Option<f64>) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    table.add_row(vec![
        Cell::new("Pot".bold().to_string()),
        Cell::new(format!("${:.0}", pot)),
    ]);
    table.add_row(vec![
        Cell::new("To Call".bold().to_string()),
        Cell::new(format!("${:.0}", bet)),
    ]);
    table.add_row(vec![
        Cell::new("Pot Odds".bold().to_string()),
        Cell::new(format!("{:.1}%", pot_odds_pct)),
    ]);

    if let Some(ev_value) = ev {
        let styled = if ev_value >= 0.0 {
            format!("${:+.2}", ev_value).green().to_string()
        } else {
            format!("${:+.2}", ev_value).red().to_string()
        };
        table.add_row(vec![Cell::new("EV".bold().to_string()), Cell::new(styled)]);
    }

    table.to_string()
}

pub fn training_table(report: &TrainingReport) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    table.add_row(vec![
        Cell::new("Episodes".bold().to_string()),
        Cell::new(format!("{}", report.episodes())),
    ]);
    table.add_row(vec![
        Cell::new("Mean reward".bold().to_string()),
        Cell::new(format!("{:.3}", report.mean_reward())),
    ]);
    table.add_row(vec![
        Cell::new("Last-100 mean".bold().to_string()),
        Cell::new(format!("{:.3}", report.tail_mean_reward(100))),
    ]);
    table.add_row(vec![
        Cell::new("States visited".bold().to_string()),
        Cell::new(format!("{}", report.states_visited)),
    ]);

    table.to_string()
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
