use crate::{Card, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DECK_SIZE: usize = 52;

/// A single-deck shoe dealt from the back of `cards`.
///
/// The cut card sits `cut_card_index` cards from the top. Once that many
/// cards have been dealt the shoe must be reshuffled before the next round.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cut_card_index: usize,
    size: usize,
    cut_range: (usize, usize),
    rng: ChaCha8Rng,
}

impl Deck {
    pub fn new(cut_range: (usize, usize)) -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy(), cut_range)
    }

    pub fn seeded(seed: u64, cut_range: (usize, usize)) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), cut_range)
    }

    fn with_rng(rng: ChaCha8Rng, cut_range: (usize, usize)) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            cut_card_index: 0,
            size: DECK_SIZE,
            cut_range,
            rng,
        };
        deck.initialize();
        deck
    }

    /// Deck that deals `cards` in the given order, first element first.
    ///
    /// The cut card sits behind the last card. When the stack runs dry the
    /// deck falls back to a freshly shuffled 52-card shoe.
    pub fn stacked(cards: Vec<Card>, cut_range: (usize, usize)) -> Self {
        let size = cards.len();
        let mut cards = cards;
        cards.reverse();
        Self {
            cards,
            cut_card_index: size,
            size,
            cut_range,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Rebuild all 52 cards, shuffle them and place a new cut card.
    pub fn initialize(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(rank, suit));
            }
        }
        self.size = DECK_SIZE;

        shuffle(&mut self.cards, &mut self.rng);

        let (low, high) = self.cut_range;
        self.cut_card_index = self.rng.gen_range(low..=high);
        log::debug!("Deck shuffled, cut card at {}", self.cut_card_index);
    }

    pub fn is_cut_card_reached(&self) -> bool {
        self.cards.len() <= self.size.saturating_sub(self.cut_card_index)
    }

    pub fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            log::warn!("Deck exhausted mid-round, reshuffling");
            self.initialize();
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cut_card_index(&self) -> usize {
        self.cut_card_index
    }

    /// Remaining cards, next to be dealt last
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Fisher-Yates: walk down from the last slot, swapping each with a uniform
/// pick from the slots at or below it.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}
