use crate::round::Phase;
use std::fmt;
use thiserror::Error;

/// Why a bet was turned down
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetError {
    #[error("bet must be positive")]
    NotPositive,
    #[error("bet {amount} is below the table minimum of {min}")]
    BelowMinimum { amount: u64, min: u64 },
    #[error("bet {amount} is above the table maximum of {max}")]
    AboveMaximum { amount: u64, max: u64 },
    #[error("bet {amount} is not a multiple of {unit}")]
    NotMultiple { amount: u64, unit: u64 },
    #[error("bet {amount} exceeds bankroll of {bankroll}")]
    ExceedsBankroll { amount: u64, bankroll: u64 },
}

/// Commands the engine accepts, used to report rejected actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Bet,
    Hit,
    Stand,
    DealerDraw,
    NewRound,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Bet => "bet",
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::DealerDraw => "draw for the dealer",
            Action::NewRound => "start a new round",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet: {0}")]
    InvalidBet(#[from] BetError),
    #[error("Cannot {action} during {phase}")]
    InvalidAction { action: Action, phase: Phase },
    #[error("Invalid table rules: {0}")]
    InvalidRules(String),
}
