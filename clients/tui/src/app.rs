use blackjack::{Game, GameError, Phase, TableView};
use crossterm::event::KeyCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_LOGS: usize = 20;
const MAX_BET_DIGITS: usize = 6;
const FLASH: Duration = Duration::from_millis(800);

pub struct App {
    game: Game,
    pub view: TableView,
    pub bet_input: String,
    pub status: String,
    pub logs: Vec<String>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    pub log_visible: bool,
    pub should_quit: bool,
    dealer_delay: Duration,
    next_dealer_step: Option<Instant>,
    flash_until: Option<Instant>,
}

impl App {
    pub fn new(game: Game, log_buffer: Arc<Mutex<Vec<String>>>, dealer_delay: Duration) -> App {
        let view = game.view();
        let rules = *game.rules();
        App {
            game,
            view,
            bet_input: rules.min_bet.to_string(),
            status: format!(
                "Type a bet ({}-{}, multiples of {}) and press [Enter]",
                rules.min_bet, rules.max_bet, rules.bet_unit
            ),
            logs: vec!["Welcome to the blackjack table!".to_string()],
            log_buffer,
            log_visible: true,
            should_quit: false,
            dealer_delay,
            next_dealer_step: None,
            flash_until: None,
        }
    }

    /// Dealer cards are drawn highlighted for a moment after they change
    pub fn dealer_flashing(&self) -> bool {
        self.flash_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') => {
                self.log_visible = !self.log_visible;
                return;
            }
            KeyCode::Char('r') if self.view.phase != Phase::DealerTurn => {
                self.restart();
                return;
            }
            _ => {}
        }

        let result = match self.view.phase {
            Phase::Betting => self.handle_betting_key(code),
            Phase::PlayerTurn => match code {
                KeyCode::Up | KeyCode::Char('h') => self.game.hit().map(|card| {
                    self.add_log(format!("You draw {card}"));
                }),
                KeyCode::Down | KeyCode::Char('s') => self.game.stand().map(|()| {
                    self.add_log("You stand".to_string());
                }),
                _ => Ok(()),
            },
            // The dealer plays out on its own clock
            Phase::DealerTurn => Ok(()),
            Phase::Settled => match code {
                KeyCode::Char('n') | KeyCode::Enter => self.game.start_new_round(),
                _ => Ok(()),
            },
        };

        self.refresh();
        if let Err(e) = result {
            self.status = e.to_string();
        }
    }

    fn handle_betting_key(&mut self, code: KeyCode) -> Result<(), GameError> {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.bet_input.len() < MAX_BET_DIGITS {
                    self.bet_input.push(c);
                }
                Ok(())
            }
            KeyCode::Backspace => {
                self.bet_input.pop();
                Ok(())
            }
            KeyCode::Enter => {
                let amount = self.bet_input.parse::<u64>().unwrap_or(0);
                self.game.place_bet(amount)?;
                self.add_log(format!("Bet {amount}"));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Advance the dealer one draw when its delay has elapsed
    pub fn tick(&mut self) {
        self.sync_logs();

        let Some(due) = self.next_dealer_step else {
            return;
        };
        if Instant::now() < due {
            return;
        }

        match self.game.dealer_step() {
            Ok(Some(step)) => {
                self.add_log(format!("Dealer draws {}, has {}", step.card, step.value));
                self.flash_until = Some(Instant::now() + FLASH);
                self.next_dealer_step = Some(Instant::now() + self.dealer_delay);
            }
            Ok(None) => self.next_dealer_step = None,
            Err(e) => {
                log::error!("Dealer step failed: {e}");
                self.next_dealer_step = None;
            }
        }
        self.refresh();
    }

    fn restart(&mut self) {
        self.game.start_game();
        self.next_dealer_step = None;
        self.add_log("New game, bankroll reset".to_string());
        self.refresh();
    }

    fn refresh(&mut self) {
        let previous = self.view.phase;
        self.view = self.game.view();

        if self.view.phase == Phase::DealerTurn && self.next_dealer_step.is_none() {
            // Hole card turns over now; first draw after one delay
            self.flash_until = Some(Instant::now() + FLASH);
            self.next_dealer_step = Some(Instant::now() + self.dealer_delay);
        }
        if self.view.phase == Phase::Settled && previous != Phase::Settled {
            self.flash_until = Some(Instant::now() + FLASH);
        }

        self.status = match self.view.phase {
            Phase::Betting if self.game.ledger().is_broke() => {
                "Out of chips. Press [R] to restart".to_string()
            }
            Phase::Betting => format!("Bet: {}_  [Enter] deal", self.bet_input),
            Phase::PlayerTurn if self.view.reshuffled => {
                "Deck reshuffled. [↑/H] Hit  [↓/S] Stand".to_string()
            }
            Phase::PlayerTurn => "[↑/H] Hit  [↓/S] Stand".to_string(),
            Phase::DealerTurn => "Dealer's turn...".to_string(),
            Phase::Settled => format!("{}  [N] next round", self.view.message),
        };
    }
}
