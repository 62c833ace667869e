use crate::Hand;
use serde::{Deserialize, Serialize};

/// How a settled round ended, from the player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBlackjack,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    DealerBlackjack,
    Push,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::PlayerHigher
        )
    }

    pub fn is_loss(&self) -> bool {
        matches!(
            self,
            Outcome::PlayerBust | Outcome::DealerHigher | Outcome::DealerBlackjack
        )
    }

    /// Single-letter code kept in the recent history
    pub fn code(&self) -> char {
        if self.is_win() {
            'W'
        } else if self.is_loss() {
            'L'
        } else {
            'D'
        }
    }
}

/// Final hands of a round, reduced to what settlement needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showdown {
    pub outcome: Outcome,
    pub player_value: u8,
    pub dealer_value: u8,
    pub player_blackjack: bool,
    pub dealer_blackjack: bool,
}

impl Showdown {
    pub fn from_hands(player: &Hand, dealer: &Hand) -> Self {
        Self {
            outcome: determine_outcome(player, dealer),
            player_value: player.value(),
            dealer_value: dealer.value(),
            player_blackjack: player.is_blackjack(),
            dealer_blackjack: dealer.is_blackjack(),
        }
    }

    pub fn message(&self) -> String {
        let (player, dealer) = (self.player_value, self.dealer_value);
        match self.outcome {
            Outcome::PlayerBlackjack => "You won with your Blackjack !".to_string(),
            Outcome::PlayerBust => "You bust !".to_string(),
            Outcome::DealerBust => "Dealer busted ! You won this hand".to_string(),
            Outcome::PlayerHigher => format!("You won with {player} against dealer {dealer}"),
            Outcome::DealerBlackjack => "Dealer has a Blackjack !".to_string(),
            Outcome::DealerHigher => format!("You lost with {player} against dealer {dealer}"),
            Outcome::Push => format!("DRAW ! Same cards values: {player}"),
        }
    }
}

/// Decide the outcome. The checks run in a fixed order and the first match
/// wins, so a player blackjack beats everything except a dealer blackjack,
/// and a player bust loses even if the dealer would have busted too.
pub fn determine_outcome(player: &Hand, dealer: &Hand) -> Outcome {
    let player_bj = player.is_blackjack();
    let dealer_bj = dealer.is_blackjack();

    if player_bj && !dealer_bj {
        Outcome::PlayerBlackjack
    } else if player.value() > 21 {
        Outcome::PlayerBust
    } else if dealer.value() > 21 {
        Outcome::DealerBust
    } else if player.value() > dealer.value() {
        Outcome::PlayerHigher
    } else if dealer_bj && !player_bj {
        Outcome::DealerBlackjack
    } else if player.value() < dealer.value() {
        Outcome::DealerHigher
    } else {
        Outcome::Push
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|r| Card::new(*r, Suit::Spades)).collect())
    }

    #[test]
    fn test_player_blackjack_beats_dealer_21() {
        let player = hand(&[Rank::Ace, Rank::King]);
        let dealer = hand(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(determine_outcome(&player, &dealer), Outcome::PlayerBlackjack);
    }

    #[test]
    fn test_both_blackjack_is_push() {
        let player = hand(&[Rank::Ace, Rank::King]);
        let dealer = hand(&[Rank::Queen, Rank::Ace]);
        let showdown = Showdown::from_hands(&player, &dealer);
        assert_eq!(showdown.outcome, Outcome::Push);
        assert!(showdown.player_blackjack);
        assert!(showdown.dealer_blackjack);
    }

    #[test]
    fn test_player_bust_checked_before_dealer_bust() {
        let player = hand(&[Rank::King, Rank::Nine, Rank::Five]);
        let dealer = hand(&[Rank::King, Rank::Six, Rank::Queen]);
        assert_eq!(determine_outcome(&player, &dealer), Outcome::PlayerBust);
    }

    #[test]
    fn test_dealer_bust() {
        let player = hand(&[Rank::King, Rank::Two]);
        let dealer = hand(&[Rank::King, Rank::Six, Rank::Queen]);
        assert_eq!(determine_outcome(&player, &dealer), Outcome::DealerBust);
    }

    #[test]
    fn test_dealer_blackjack_beats_three_card_21() {
        let player = hand(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        let dealer = hand(&[Rank::Ace, Rank::Jack]);
        assert_eq!(determine_outcome(&player, &dealer), Outcome::DealerBlackjack);
    }

    #[test]
    fn test_higher_and_lower() {
        let eighteen = hand(&[Rank::King, Rank::Eight]);
        let seventeen = hand(&[Rank::Six, Rank::Five, Rank::Six]);
        assert_eq!(determine_outcome(&eighteen, &seventeen), Outcome::PlayerHigher);
        assert_eq!(determine_outcome(&seventeen, &eighteen), Outcome::DealerHigher);
    }

    #[test]
    fn test_equal_totals_push() {
        let player = hand(&[Rank::King, Rank::Queen]);
        let dealer = hand(&[Rank::Jack, Rank::Ten]);
        let showdown = Showdown::from_hands(&player, &dealer);
        assert_eq!(showdown.outcome, Outcome::Push);
        assert_eq!(showdown.message(), "DRAW ! Same cards values: 20");
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(Outcome::PlayerBlackjack.code(), 'W');
        assert_eq!(Outcome::DealerBust.code(), 'W');
        assert_eq!(Outcome::PlayerHigher.code(), 'W');
        assert_eq!(Outcome::PlayerBust.code(), 'L');
        assert_eq!(Outcome::DealerHigher.code(), 'L');
        assert_eq!(Outcome::DealerBlackjack.code(), 'L');
        assert_eq!(Outcome::Push.code(), 'D');
    }
}
