use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }

    /// Blackjack value with the ace counted high
    pub fn value(&self) -> u8 {
        match self.rank {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u8,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Suit-major index: spades 0..13, hearts 13..26, diamonds 26..39, clubs 39..52.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 52 {
            return None;
        }
        Some(Self::new(Rank::ALL[index % 13], Suit::ALL[index / 13]))
    }

    pub fn index(&self) -> usize {
        self.suit as usize * 13 + (self.rank as usize - 1)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_values() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).value(), 11);
        assert_eq!(Card::new(Rank::Seven, Suit::Hearts).value(), 7);
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).value(), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Diamonds).value(), 10);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_display(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
        assert_eq!(Card::new(Rank::Queen, Suit::Clubs).to_string(), "Q♣");
    }

    #[test]
    fn test_index_round_trip() {
        for i in 0..52 {
            let card = Card::from_index(i).unwrap();
            assert_eq!(card.index(), i);
        }
        assert_eq!(Card::from_index(0), Some(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(Card::from_index(51), Some(Card::new(Rank::King, Suit::Clubs)));
        assert_eq!(Card::from_index(52), None);
    }
}
