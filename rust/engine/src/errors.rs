use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Raise to {amount} is below the minimum raise to {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("Cannot check while facing a bet")]
    CheckNotAllowed,
    #[error("Nothing to call, check instead")]
    NothingToCall,
    #[error("Cannot bet while a bet is open, raise instead")]
    BetNotAllowed,
    #[error("Cannot raise without an open bet, bet instead")]
    RaiseNotAllowed,
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Not enough cards left in the deck")]
    InsufficientCards,
    #[error("Hand evaluation requires 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
    #[error("Invalid card notation: {0}")]
    InvalidCard(String),
    #[error("Seat count {0} is outside the supported 2..=6 range")]
    InvalidSeatCount(usize),
    #[error("Invalid blinds: small {small} / big {big}")]
    InvalidBlinds { small: u32, big: u32 },
    #[error("At least two seats with chips are required")]
    NotEnoughPlayers,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
}
