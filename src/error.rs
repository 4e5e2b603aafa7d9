//! Error types for game operations.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Errors raised when a finished hand is asked to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    /// Hand has already busted.
    #[error("hand is bust")]
    Bust,
    /// Hand has already stood.
    #[error("hand is standing")]
    Stand,
}

/// Errors reported by a [`Wallet`](crate::wallet::Wallet) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Balance is short even after any loan was granted.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the operation needed.
        required: u64,
        /// Balance that was available.
        available: u64,
    },
    /// No wallet exists for the user.
    #[error("wallet not found")]
    NotFound,
    /// Ledger backend failure.
    #[error("wallet backend error: {0}")]
    Backend(String),
}

/// Errors reported by a [`Repository`](crate::repository::Repository) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Storage backend failure.
    #[error("repository backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while seating players or starting the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The game has already left the waiting phase.
    #[error("game already in progress")]
    GameInProgress,
    /// The player is already seated.
    #[error("player already seated")]
    AlreadySeated,
    /// No players are seated.
    #[error("no players seated")]
    NoPlayers,
    /// Player id ends with the suffix reserved for split hands.
    #[error("player id is reserved for split hands")]
    ReservedSeatId,
    /// The player's wallet could not be opened.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// The shoe could not be loaded or saved.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game phase for dealing.
    #[error("invalid game phase for dealing")]
    InvalidAction,
    /// Some players have not placed a bet yet.
    #[error("bets are still outstanding")]
    BetsOutstanding,
    /// A hand refused a dealt card.
    #[error(transparent)]
    Hand(#[from] HandError),
    /// The shoe could not be loaded or saved.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    /// The game has not been started.
    #[error("game not started")]
    GameNotStarted,
    /// Invalid game phase for betting.
    #[error("invalid game phase for betting")]
    InvalidAction,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Not this player's turn to bet.
    #[error("not your turn")]
    NotYourTurn,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Player already has a bet recorded this game.
    #[error("bet already placed; deal to continue")]
    AlreadyBet,
    /// The stake could not be collected.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// The bet was recorded but dealing failed.
    #[error("dealing failed: {0}")]
    Deal(#[from] DealError),
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game has not been started.
    #[error("game not started")]
    GameNotStarted,
    /// Invalid game phase for this action.
    #[error("invalid game phase for this action")]
    InvalidAction,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Not this player's turn.
    #[error("not your turn")]
    NotYourTurn,
    /// The hand is already finished.
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// Errors that can occur while placing or declining special bets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecialBetError {
    /// The game has not been started.
    #[error("game not started")]
    GameNotStarted,
    /// Invalid game phase for this special bet.
    #[error("invalid game phase for this special bet")]
    InvalidAction,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Not this player's turn.
    #[error("not your turn")]
    NotYourTurn,
    /// No bet found for the player.
    #[error("no bet found for player")]
    NoBet,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Insurance is not available for this hand.
    #[error("insurance is not available")]
    CannotInsure,
    /// The hand is already finished.
    #[error(transparent)]
    Hand(#[from] HandError),
    /// The stake could not be collected.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Errors that can occur during dealer play, results, and payouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// The game has not been started.
    #[error("game not started")]
    GameNotStarted,
    /// Invalid game phase for this step.
    #[error("invalid game phase for showdown")]
    InvalidAction,
    /// Some seats are still playing.
    #[error("players are still acting")]
    PlayersStillActing,
    /// The dealer's hand refused a card.
    #[error(transparent)]
    Hand(#[from] HandError),
    /// The result or shoe could not be saved.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
