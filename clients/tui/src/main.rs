use blackjack::{Game, TableRules};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use std::{error::Error, fs, io};

mod app;
use app::App;

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

const LOG_CAPACITY: usize = 200;

#[derive(Parser)]
#[command(name = "blackjack-tui", about = "Single-seat blackjack in the terminal")]
struct Cli {
    /// JSON file with table rules; missing fields keep their defaults
    #[arg(long, env = "BLACKJACK_RULES")]
    rules: Option<PathBuf>,

    /// Starting bankroll
    #[arg(long, env = "BLACKJACK_BANKROLL")]
    bankroll: Option<u64>,

    /// Smallest accepted bet
    #[arg(long)]
    min_bet: Option<u64>,

    /// Largest accepted bet
    #[arg(long)]
    max_bet: Option<u64>,

    /// Pause between dealer draws
    #[arg(long, env = "BLACKJACK_DEALER_DELAY_MS", default_value = "800")]
    dealer_delay_ms: u64,

    /// Seed for a reproducible shoe
    #[arg(long)]
    seed: Option<u64>,

    /// Show debug messages in the game log
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn load_rules(cli: &Cli) -> Result<TableRules, Box<dyn Error>> {
    let mut rules = match &cli.rules {
        Some(path) => serde_json::from_str::<TableRules>(&fs::read_to_string(path)?)?,
        None => TableRules::default(),
    };
    if let Some(bankroll) = cli.bankroll {
        rules.starting_bankroll = bankroll;
    }
    if let Some(min_bet) = cli.min_bet {
        rules.min_bet = min_bet;
    }
    if let Some(max_bet) = cli.max_bet {
        rules.max_bet = max_bet;
    }
    Ok(rules)
}

/// Install the game log, then start the game so its opening line is captured
fn open_table(
    game: &mut Game,
    level: log::LevelFilter,
) -> Result<Arc<Mutex<Vec<String>>>, log::SetLoggerError> {
    let (logger, log_buffer) = TuiLogger::new(level, LOG_CAPACITY);
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;
    game.start_game();
    Ok(log_buffer)
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Bad rules are reported before the terminal switches to raw mode
    let rules = load_rules(&cli)?;
    let mut game = match cli.seed {
        Some(seed) => Game::seeded(rules, seed)?,
        None => Game::new(rules)?,
    };

    // Initialize custom logger
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let log_buffer = open_table(&mut game, level)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let app = App::new(game, log_buffer, Duration::from_millis(cli.dealer_delay_ms));
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.tick();
        terminal.draw(|f| ui::ui(f, &app))?;

        // Short poll keeps the dealer animation moving between key presses
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_line_reaches_game_log() {
        let mut game = Game::seeded(TableRules::default(), 3).unwrap();
        let log_buffer = open_table(&mut game, log::LevelFilter::Info).unwrap();
        let lines = log_buffer.lock().unwrap().clone();
        assert!(lines.iter().any(|l| l == "New game, bankroll 1000"));
    }
}
