use blackjack::{Game, Phase, PayoutRatio, Statistics, TableRules};
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "simulate",
    about = "Play blackjack rounds headless with a fixed hit-below policy"
)]
struct Args {
    /// Number of rounds to play (stops early when the bankroll runs dry)
    #[arg(long, default_value = "1000")]
    rounds: u32,

    /// Stake for every round
    #[arg(long, default_value = "10")]
    bet: u64,

    /// Player hits below this total and stands on it
    #[arg(long, default_value = "17")]
    stand_on: u8,

    /// Seed for a reproducible shoe
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with table rules; missing fields keep their defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Blackjack payout ratio (e.g. "3:2", "6:5")
    #[arg(long)]
    blackjack_payout: Option<String>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    rounds: u32,
    starting_bankroll: u64,
    final_bankroll: u64,
    net: i64,
    statistics: Statistics,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut rules = match &args.rules {
        Some(path) => serde_json::from_str::<TableRules>(&fs::read_to_string(path)?)?,
        None => TableRules::default(),
    };
    if let Some(payout) = &args.blackjack_payout {
        rules.blackjack_payout = parse_payout(payout)?;
    }

    let mut game = match args.seed {
        Some(seed) => Game::seeded(rules, seed)?,
        None => Game::new(rules)?,
    };
    game.start_game();

    let mut played = 0;
    while played < args.rounds && !game.ledger().is_broke() {
        if let Err(e) = game.place_bet(args.bet) {
            log::warn!("Stopping after {played} rounds: {e}");
            break;
        }
        while game.phase() == Phase::PlayerTurn {
            if game.round().player().value() < args.stand_on {
                game.hit()?;
            } else {
                game.stand()?;
            }
        }
        game.play_dealer();
        if let Some(settlement) = game.last_settlement() {
            log::info!("Round {}: {settlement}", played + 1);
        }
        game.start_new_round()?;
        played += 1;
    }

    let final_bankroll = game.ledger().bankroll();
    let summary = Summary {
        rounds: played,
        starting_bankroll: rules.starting_bankroll,
        final_bankroll,
        net: final_bankroll as i64 - rules.starting_bankroll as i64,
        statistics: game.ledger().statistics().clone(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    let stats = &summary.statistics;
    let rounds = stats.rounds_played.max(1) as f64;
    println!("Rounds played:      {}", stats.rounds_played);
    println!(
        "Wins / losses / draws: {} / {} / {} ({:.1}% won)",
        stats.wins,
        stats.losses,
        stats.draws,
        stats.wins as f64 * 100.0 / rounds
    );
    println!(
        "Blackjacks:         player {}, dealer {}",
        stats.player_blackjacks, stats.dealer_blackjacks
    );
    println!("Best win:           {}", stats.best_win);
    println!("Worst loss:         {}", stats.worst_loss);
    println!("Last outcomes:      {}", stats.recent);
    println!(
        "Bankroll:           {} -> {} ({:+})",
        summary.starting_bankroll, summary.final_bankroll, summary.net
    );
}

fn parse_payout(s: &str) -> Result<PayoutRatio, Box<dyn Error>> {
    let (num, den) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid payout ratio '{s}', expected N:D"))?;
    Ok(PayoutRatio::new(num.trim().parse()?, den.trim().parse()?)?)
}
