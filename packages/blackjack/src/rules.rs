use crate::GameError;
use serde::{Deserialize, Serialize};

/// Payout multiplier as a ratio, applied to the bet on top of returning it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Winnings on `bet`, saturating at `u64::MAX`
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let payout = (bet as u128 * self.numerator as u128) / self.denominator as u128;
        u64::try_from(payout).unwrap_or(u64::MAX)
    }

    /// Whether every multiple of `unit` pays out a whole number of chips
    pub fn is_whole_for(&self, unit: u64) -> bool {
        self.denominator != 0
            && (unit as u128 * self.numerator as u128) % self.denominator as u128 == 0
    }
}

/// House limits and payouts for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    /// Chips the player sits down with
    pub starting_bankroll: u64,

    pub min_bet: u64,
    pub max_bet: u64,

    /// Every bet must be a multiple of this
    pub bet_unit: u64,

    /// Blackjack payout multiplier (3:2 by default)
    pub blackjack_payout: PayoutRatio,

    /// Payout for an ordinary win
    pub standard_payout: PayoutRatio,

    /// Dealer draws below this total and stands on it, soft or hard
    pub dealer_stands_on: u8,

    /// Inclusive range the cut card is placed in after every shuffle
    pub cut_card_min: usize,
    pub cut_card_max: usize,

    /// Number of outcome codes kept in the recent history
    pub history_len: usize,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_bankroll: 1000,
            min_bet: 10,
            max_bet: 200,
            bet_unit: 2,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            standard_payout: PayoutRatio::ONE_TO_ONE,
            dealer_stands_on: 17,
            cut_card_min: 38,
            cut_card_max: 42,
            history_len: 5,
        }
    }
}

/// Upper bound for the bankroll and for what a single bet can return
pub const MAX_CHIPS: u64 = i64::MAX as u64;

impl TableRules {
    /// Most a maximum bet can pay back, stake included
    fn largest_return(&self) -> u64 {
        let ratio = |r: PayoutRatio| r.calculate_payout(self.max_bet);
        let winnings = ratio(self.blackjack_payout).max(ratio(self.standard_payout));
        self.max_bet.saturating_add(winnings)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidRules(msg.to_string()));

        if self.bet_unit == 0 {
            return invalid("bet unit must be positive");
        }
        if self.min_bet == 0 {
            return invalid("minimum bet must be positive");
        }
        if self.min_bet > self.max_bet {
            return invalid("minimum bet exceeds maximum bet");
        }
        if self.blackjack_payout.denominator == 0 || self.standard_payout.denominator == 0 {
            return invalid("payout denominator cannot be zero");
        }
        if !self.blackjack_payout.is_whole_for(self.bet_unit) {
            return invalid("bet unit does not yield whole blackjack payouts");
        }
        if !self.standard_payout.is_whole_for(self.bet_unit) {
            return invalid("bet unit does not yield whole standard payouts");
        }
        // Settlement reports the net of a round as i64.
        if self.starting_bankroll > MAX_CHIPS || self.largest_return() > MAX_CHIPS {
            return invalid("bankroll and maximum bet payout must fit in i64");
        }
        if !(12..=21).contains(&self.dealer_stands_on) {
            return invalid("dealer stand threshold must be between 12 and 21");
        }
        // A round deals at least four cards.
        if self.cut_card_min < 4 || self.cut_card_min > self.cut_card_max || self.cut_card_max > 52 {
            return invalid("cut card range must lie within the deck");
        }
        if self.history_len == 0 {
            return invalid("history length must be positive");
        }
        Ok(())
    }
}
