mod card;
mod deck;
mod error;
mod game;
mod hand;
mod ledger;
mod outcome;
mod round;
mod rules;

pub use card::{Card, Rank, Suit};
pub use deck::{shuffle, Deck, DECK_SIZE};
pub use error::{Action, BetError, GameError};
pub use game::{DealerPlay, Game, TableView};
pub use hand::{calculate_hand_value, is_blackjack, is_busted, is_soft_hand, Hand};
pub use ledger::{Ledger, Settlement, Statistics};
pub use outcome::{determine_outcome, Outcome, Showdown};
pub use round::{DealerStep, Phase, RoundState, TurnOwner};
pub use rules::{PayoutRatio, TableRules, MAX_CHIPS};
