use crate::{Action, Card, Deck, GameError, Hand, Showdown};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracks whose turn it is in the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOwner {
    Player,
    Dealer,
    None, // Betting or settled
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Settled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Betting => "betting",
            Phase::PlayerTurn => "the player's turn",
            Phase::DealerTurn => "the dealer's turn",
            Phase::Settled => "a settled round",
        };
        f.write_str(name)
    }
}

/// One dealer draw, as seen right after the card landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerStep {
    pub card: Card,
    pub value: u8,
    pub cards: Vec<Card>,
}

/// Hands, stake and phase of the round in play
#[derive(Debug, Clone)]
pub struct RoundState {
    player: Hand,
    dealer: Hand,
    bet: u64,
    phase: Phase,
    current_turn: TurnOwner,
    dealer_revealed: bool,
    showdown: Option<Showdown>,
    dealer_stands_on: u8,
}

impl RoundState {
    pub fn new(dealer_stands_on: u8) -> Self {
        Self {
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            phase: Phase::Betting,
            current_turn: TurnOwner::None,
            dealer_revealed: false,
            showdown: None,
            dealer_stands_on,
        }
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_turn(&self) -> TurnOwner {
        self.current_turn
    }

    pub fn is_dealer_revealed(&self) -> bool {
        self.dealer_revealed
    }

    pub fn showdown(&self) -> Option<Showdown> {
        self.showdown
    }

    /// Dealer cards as the table sees them; `None` marks the hole card
    pub fn visible_dealer_cards(&self) -> Vec<Option<Card>> {
        self.dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                if idx == 1 && !self.dealer_revealed {
                    None
                } else {
                    Some(*card)
                }
            })
            .collect()
    }

    pub fn visible_dealer_value(&self) -> u8 {
        if self.dealer_revealed {
            self.dealer.value()
        } else {
            self.dealer.cards().first().map(Card::value).unwrap_or(0)
        }
    }

    fn require(&self, phase: Phase, action: Action) -> Result<(), GameError> {
        if self.phase != phase {
            return Err(GameError::InvalidAction {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Deal the opening hands: player, dealer, player, dealer.
    pub fn deal(&mut self, deck: &mut Deck, bet: u64) -> Result<(), GameError> {
        self.require(Phase::Betting, Action::Bet)?;

        self.player.clear();
        self.dealer.clear();
        self.bet = bet;
        self.showdown = None;
        self.dealer_revealed = false;

        self.player.add_card(deck.draw());
        self.dealer.add_card(deck.draw());
        self.player.add_card(deck.draw());
        self.dealer.add_card(deck.draw());

        log::info!(
            "Dealt {} {} against dealer {} (bet {bet})",
            self.player.cards()[0],
            self.player.cards()[1],
            self.dealer.cards()[0]
        );

        self.phase = Phase::PlayerTurn;
        self.current_turn = TurnOwner::Player;
        self.check_player_hand();
        Ok(())
    }

    pub fn hit(&mut self, deck: &mut Deck) -> Result<Card, GameError> {
        self.require(Phase::PlayerTurn, Action::Hit)?;

        let card = deck.draw();
        self.player.add_card(card);
        log::debug!("Player draws {card}, has {}", self.player.value());

        self.check_player_hand();
        Ok(card)
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        self.require(Phase::PlayerTurn, Action::Stand)?;
        log::debug!("Player stands on {}", self.player.value());
        self.start_dealer_turn();
        Ok(())
    }

    pub fn dealer_should_hit(&self) -> bool {
        self.dealer.value() < self.dealer_stands_on
    }

    /// Draw one dealer card, or settle the round once the dealer stands or
    /// busts. Returns `None` on the settling call.
    pub fn dealer_step(&mut self, deck: &mut Deck) -> Result<Option<DealerStep>, GameError> {
        self.require(Phase::DealerTurn, Action::DealerDraw)?;

        if !self.dealer_should_hit() {
            self.settle();
            return Ok(None);
        }

        let card = deck.draw();
        self.dealer.add_card(card);
        log::debug!("Dealer draws {card}, has {}", self.dealer.value());

        Ok(Some(DealerStep {
            card,
            value: self.dealer.value(),
            cards: self.dealer.cards().to_vec(),
        }))
    }

    /// Clear the settled round and wait for the next bet
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.require(Phase::Settled, Action::NewRound)?;
        self.player.clear();
        self.dealer.clear();
        self.bet = 0;
        self.showdown = None;
        self.dealer_revealed = false;
        self.phase = Phase::Betting;
        self.current_turn = TurnOwner::None;
        Ok(())
    }

    // Runs after the deal and after every hit, in this order:
    // bust, natural, 21 with more cards, dealer blackjack peek.
    fn check_player_hand(&mut self) {
        let value = self.player.value();

        if value > 21 {
            log::debug!("Player busts with {value}");
            self.settle();
        } else if value == 21 && self.player.len() == 2 {
            log::debug!("Player has a Blackjack");
            self.settle();
        } else if value == 21 {
            self.start_dealer_turn();
        } else if self.dealer.is_blackjack() {
            log::debug!("Dealer peeks and has a Blackjack");
            self.start_dealer_turn();
        }
    }

    fn start_dealer_turn(&mut self) {
        self.dealer_revealed = true;
        self.phase = Phase::DealerTurn;
        self.current_turn = TurnOwner::Dealer;
    }

    fn settle(&mut self) {
        self.dealer_revealed = true;
        self.showdown = Some(Showdown::from_hands(&self.player, &self.dealer));
        self.phase = Phase::Settled;
        self.current_turn = TurnOwner::None;
    }
}

#[cfg(test)]
mod tests;
