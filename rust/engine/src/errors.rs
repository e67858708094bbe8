use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Wager must be at least 1")]
    WagerTooSmall,
    #[error("Wager {amount} exceeds bankroll {bankroll}")]
    WagerExceedsBankroll { amount: u64, bankroll: u64 },
    #[error("Shoe exhausted: requested {requested} cards, only {available} in circulation")]
    ShoeExhausted { requested: usize, available: usize },
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("No wager has been accepted")]
    NoWagerAccepted,
    #[error("No hand has been dealt")]
    NoHandDealt,
    #[error("No hold selection is being awaited")]
    NotAwaitingHold,
    #[error("Session has already ended")]
    SessionEnded,
}
