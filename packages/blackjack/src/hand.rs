use crate::Card;
use serde::{Deserialize, Serialize};

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut soft_aces = 0;

    for card in cards {
        if card.is_ace() {
            soft_aces += 1;
        }
        total += card.value() as u16;
    }

    // Adjust for aces
    while total > 21 && soft_aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        soft_aces -= 1;
    }

    total.min(u8::MAX as u16) as u8
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard_total: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum();
    let value = calculate_hand_value(cards) as u16;
    cards.iter().any(Card::is_ace) && value <= 21 && hard_total + 10 == value
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == 21
}

/// Cards held by one side of the table, with the total kept in step.
///
/// Serialized as its card list; the total is recomputed on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
    sum: u8,
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand::from_cards(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        let sum = calculate_hand_value(&cards);
        Self { cards, sum }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        self.sum
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        self.sum > 21
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.sum = calculate_hand_value(&self.cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.sum = 0;
    }
}
