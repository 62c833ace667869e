//! Single-seat table: one deck, one round and one ledger behind the commands
//! a front end issues.

use crate::{
    Action, Card, Deck, DealerStep, GameError, Ledger, Phase, RoundState, Settlement,
    Statistics, TableRules,
};
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw the table after a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub phase: Phase,
    pub player_cards: Vec<Card>,
    pub player_value: u8,
    pub player_soft: bool,
    /// `None` marks the dealer's hole card while it is face down
    pub dealer_cards: Vec<Option<Card>>,
    pub dealer_value: u8,
    pub cards_remaining: usize,
    /// The shoe was reshuffled before this round was dealt
    pub reshuffled: bool,
    pub bankroll: u64,
    pub bet: u64,
    pub message: String,
    pub statistics: Statistics,
    pub last_settlement: Option<Settlement>,
}

pub struct Game {
    rules: TableRules,
    deck: Deck,
    round: RoundState,
    ledger: Ledger,
    last_settlement: Option<Settlement>,
    reshuffled: bool,
    message: String,
}

impl Game {
    pub fn new(rules: TableRules) -> Result<Self, GameError> {
        let deck = Deck::new(cut_range(&rules));
        Self::with_deck(rules, deck)
    }

    pub fn seeded(rules: TableRules, seed: u64) -> Result<Self, GameError> {
        let deck = Deck::seeded(seed, cut_range(&rules));
        Self::with_deck(rules, deck)
    }

    /// Build a game around a prepared deck, e.g. a stacked one
    pub fn with_deck(rules: TableRules, deck: Deck) -> Result<Self, GameError> {
        rules.validate()?;
        Ok(Self {
            rules,
            deck,
            round: RoundState::new(rules.dealer_stands_on),
            ledger: Ledger::new(rules),
            last_settlement: None,
            reshuffled: false,
            message: String::new(),
        })
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    /// Fresh shoe, fresh bankroll, cleared statistics
    pub fn start_game(&mut self) {
        self.deck.initialize();
        self.round = RoundState::new(self.rules.dealer_stands_on);
        self.ledger = Ledger::new(self.rules);
        self.last_settlement = None;
        self.reshuffled = false;
        self.message = "Place your bet".to_string();
        log::info!("New game, bankroll {}", self.ledger.bankroll());
    }

    /// Take the stake and deal. A shoe past its cut card is reshuffled first.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), GameError> {
        let phase = self.round.phase();
        if phase != Phase::Betting {
            return Err(GameError::InvalidAction {
                action: Action::Bet,
                phase,
            });
        }
        if let Err(err) = self.ledger.place_bet(amount) {
            log::debug!("Bet of {amount} rejected: {err}");
            return Err(err.into());
        }

        self.message.clear();
        self.reshuffled = self.deck.is_cut_card_reached();
        if self.reshuffled {
            self.deck.initialize();
            self.message = "Deck reshuffled".to_string();
            log::info!("Cut card reached, deck reshuffled");
        }

        self.last_settlement = None;
        self.round.deal(&mut self.deck, amount)?;
        self.settle_if_done();
        // A natural settles on the deal; keep the reshuffle notice with it
        if self.reshuffled && self.round.phase() == Phase::Settled {
            self.message = format!("Deck reshuffled. {}", self.message);
        }
        Ok(())
    }

    pub fn hit(&mut self) -> Result<Card, GameError> {
        let card = self.round.hit(&mut self.deck)?;
        self.settle_if_done();
        Ok(card)
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        self.round.stand()
    }

    /// One dealer draw; `Ok(None)` once the dealer is done and the round is
    /// paid out.
    pub fn dealer_step(&mut self) -> Result<Option<DealerStep>, GameError> {
        let step = self.round.dealer_step(&mut self.deck)?;
        self.settle_if_done();
        Ok(step)
    }

    /// Dealer draws one at a time, for a caller that paces the reveals
    pub fn dealer_play(&mut self) -> DealerPlay<'_> {
        DealerPlay { game: self }
    }

    /// Run the dealer turn to completion
    pub fn play_dealer(&mut self) -> Vec<DealerStep> {
        self.dealer_play().collect()
    }

    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        self.round.reset()?;
        self.message = if self.ledger.is_broke() {
            "Not enough chips for the table minimum".to_string()
        } else {
            "Place your bet".to_string()
        };
        Ok(())
    }

    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    pub fn view(&self) -> TableView {
        let player = self.round.player();
        TableView {
            phase: self.round.phase(),
            player_cards: player.cards().to_vec(),
            player_value: player.value(),
            player_soft: player.is_soft(),
            dealer_cards: self.round.visible_dealer_cards(),
            dealer_value: self.round.visible_dealer_value(),
            cards_remaining: self.deck.remaining(),
            reshuffled: self.reshuffled,
            bankroll: self.ledger.bankroll(),
            bet: self.round.bet(),
            message: self.message.clone(),
            statistics: self.ledger.statistics().clone(),
            last_settlement: self.last_settlement,
        }
    }

    // Pays out exactly once: the round leaves `Settled` only through reset.
    fn settle_if_done(&mut self) {
        if self.round.phase() != Phase::Settled || self.last_settlement.is_some() {
            return;
        }
        if let Some(showdown) = self.round.showdown() {
            let settlement = self.ledger.settle(showdown, self.round.bet());
            self.message = settlement.to_string();
            self.last_settlement = Some(settlement);
        }
    }
}

/// Pulls dealer draws one by one; ends when the round is settled
pub struct DealerPlay<'a> {
    game: &'a mut Game,
}

impl Iterator for DealerPlay<'_> {
    type Item = DealerStep;

    fn next(&mut self) -> Option<DealerStep> {
        self.game.dealer_step().ok().flatten()
    }
}

fn cut_range(rules: &TableRules) -> (usize, usize) {
    (rules.cut_card_min, rules.cut_card_max)
}
