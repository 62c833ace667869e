use crate::{BetError, Outcome, Showdown, TableRules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Running totals across every settled round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub player_blackjacks: u32,
    pub dealer_blackjacks: u32,
    /// Largest net gain in a single round
    pub best_win: u64,
    /// Largest net loss in a single round
    pub worst_loss: u64,
    /// Outcome codes, most recent first
    pub recent: String,
}

/// Money moved by one settled round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub showdown: Showdown,
    pub bet: u64,
    /// Chips returned to the bankroll, stake included
    pub payout: u64,
    /// Payout minus the stake
    pub net: i64,
    pub bankroll: u64,
}

impl Settlement {
    pub fn outcome(&self) -> Outcome {
        self.showdown.outcome
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.showdown.message())?;
        match self.net {
            n if n > 0 => write!(f, " (+{n})"),
            n if n < 0 => write!(f, " ({n})"),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    bankroll: u64,
    stats: Statistics,
    rules: TableRules,
}

impl Ledger {
    pub fn new(rules: TableRules) -> Self {
        Self {
            bankroll: rules.starting_bankroll,
            stats: Statistics::default(),
            rules,
        }
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Not enough chips left for the table minimum
    pub fn is_broke(&self) -> bool {
        self.bankroll < self.rules.min_bet
    }

    pub fn validate_bet(&self, amount: u64) -> Result<(), BetError> {
        let rules = &self.rules;
        if amount == 0 {
            return Err(BetError::NotPositive);
        }
        if amount < rules.min_bet {
            return Err(BetError::BelowMinimum {
                amount,
                min: rules.min_bet,
            });
        }
        if amount > rules.max_bet {
            return Err(BetError::AboveMaximum {
                amount,
                max: rules.max_bet,
            });
        }
        if amount % rules.bet_unit != 0 {
            return Err(BetError::NotMultiple {
                amount,
                unit: rules.bet_unit,
            });
        }
        if amount > self.bankroll {
            return Err(BetError::ExceedsBankroll {
                amount,
                bankroll: self.bankroll,
            });
        }
        Ok(())
    }

    /// Validate and take the stake out of the bankroll
    pub fn place_bet(&mut self, amount: u64) -> Result<(), BetError> {
        self.validate_bet(amount)?;
        self.bankroll -= amount;
        Ok(())
    }

    /// Total returned to the player for `bet`, stake included
    pub fn payout(&self, outcome: Outcome, bet: u64) -> u64 {
        match outcome {
            Outcome::PlayerBlackjack => bet + self.rules.blackjack_payout.calculate_payout(bet),
            Outcome::DealerBust | Outcome::PlayerHigher => {
                bet + self.rules.standard_payout.calculate_payout(bet)
            }
            Outcome::Push => bet,
            Outcome::PlayerBust | Outcome::DealerHigher | Outcome::DealerBlackjack => 0,
        }
    }

    pub fn settle(&mut self, showdown: Showdown, bet: u64) -> Settlement {
        let payout = self.payout(showdown.outcome, bet);
        self.bankroll = self.bankroll.saturating_add(payout);
        let net = payout as i64 - bet as i64;

        let stats = &mut self.stats;
        stats.rounds_played += 1;
        match showdown.outcome.code() {
            'W' => stats.wins += 1,
            'L' => stats.losses += 1,
            _ => stats.draws += 1,
        }
        if showdown.player_blackjack {
            stats.player_blackjacks += 1;
        }
        if showdown.dealer_blackjack {
            stats.dealer_blackjacks += 1;
        }
        if net > 0 {
            stats.best_win = stats.best_win.max(net as u64);
        } else if net < 0 {
            stats.worst_loss = stats.worst_loss.max(net.unsigned_abs());
        }
        stats.recent.insert(0, showdown.outcome.code());
        stats.recent.truncate(self.rules.history_len);

        log::info!(
            "Round settled: {:?}, bet {bet}, payout {payout}, bankroll {}",
            showdown.outcome,
            self.bankroll
        );

        Settlement {
            showdown,
            bet,
            payout,
            net,
            bankroll: self.bankroll,
        }
    }
}
