//! A per-channel multiplayer blackjack engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one channel's match: seating,
//! turn-ordered betting, dealing from a persisted shoe, the optional
//! double-down/insurance and split phases, hit/stand play, dealer play,
//! results, and payouts. Balances live behind the [`Wallet`] trait and shoes
//! and results behind the [`Repository`] trait.
//!
//! # Example
//!
//! ```no_run
//! use bjengine::{Game, GameOptions, MemoryRepository, Wallet};
//!
//! fn run<W: Wallet>(wallet: W) {
//!     let repository = MemoryRepository::new();
//!     let game = Game::new("channel-1", GameOptions::default(), 42, &repository, wallet);
//!     game.add_player("alice").unwrap();
//!     game.start().unwrap();
//!     game.place_bet("alice", 100).unwrap();
//!     game.stand("alice").unwrap();
//!     let finished = game.finish_game().unwrap();
//!     let _ = finished;
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod payout;
pub mod repository;
pub mod result;
pub mod score;
pub mod shoe;
mod sync;
pub mod wallet;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{
    ActionError, BetError, DealError, HandError, RepositoryError, ShowdownError, SpecialBetError,
    TableError, WalletError,
};
pub use game::{Game, Phase, split_seat_id};
pub use hand::{DoubleDownInfo, Hand, HandStatus, InsuranceInfo, SplitInfo};
pub use options::GameOptions;
pub use repository::{MemoryRepository, Repository};
pub use result::{
    CreditStatus, FinishedGame, GameResult, HandOutcome, PayoutEntry, PayoutReport, SeatResult,
};
pub use shoe::Shoe;
pub use wallet::{Wallet, WalletAccount};
