//! Result types for finished games and payouts.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Result of a single seat against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandOutcome {
    /// Seat beat the dealer; pays 1:1.
    Win,
    /// Seat lost its stake.
    Lose,
    /// Tie; the stake is returned.
    Push,
    /// Seat won with a natural; pays 3:2.
    Blackjack,
}

/// Outcome of one seat in a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    /// Seat id, which differs from the player id for a split sibling.
    pub seat_id: String,
    /// Player who owns the seat and receives its payout.
    pub player_id: String,
    /// The outcome of the seat.
    pub outcome: HandOutcome,
    /// Best score of the seat's hand.
    pub score: u8,
    /// Total stake on the hand, including any double-down.
    pub stake: u64,
    /// Amount returned for the hand (stake included).
    pub payout: u64,
    /// Insurance stake (0 if none was placed).
    pub insurance: u64,
    /// Insurance payout (0 unless the dealer held blackjack).
    pub insurance_payout: u64,
    /// Whether the hand doubled down.
    pub doubled: bool,
    /// Whether the hand came out of a split.
    pub split: bool,
}

impl SeatResult {
    /// Returns everything owed to the owner for this seat.
    #[must_use]
    pub const fn total_payout(&self) -> u64 {
        self.payout.saturating_add(self.insurance_payout)
    }
}

/// Snapshot of a finished game, persisted once per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Game id.
    pub game_id: u64,
    /// Channel the game was played in.
    pub channel_id: String,
    /// Per-seat results in turn order.
    pub seats: Vec<SeatResult>,
    /// The dealer's final score.
    pub dealer_score: u8,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
}

impl GameResult {
    /// Returns the result for a seat.
    #[must_use]
    pub fn seat(&self, seat_id: &str) -> Option<&SeatResult> {
        self.seats.iter().find(|seat| seat.seat_id == seat_id)
    }
}

/// What happened when a seat's payout was credited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditStatus {
    /// Nothing was owed.
    NothingOwed,
    /// The wallet accepted the credit.
    Credited,
    /// The wallet rejected the credit.
    Failed(WalletError),
}

/// Payout applied to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutEntry {
    /// Seat id.
    pub seat_id: String,
    /// Player credited.
    pub player_id: String,
    /// The seat's outcome.
    pub outcome: HandOutcome,
    /// Amount owed (hand payout plus insurance payout).
    pub amount: u64,
    /// How the credit went.
    pub credit: CreditStatus,
}

/// Per-seat record of a payout run.
///
/// Seats are credited independently, so a report can mix credited and
/// failed entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayoutReport {
    /// One entry per seat in turn order.
    pub entries: Vec<PayoutEntry>,
}

impl PayoutReport {
    /// Returns the entries whose credit failed.
    pub fn failures(&self) -> impl Iterator<Item = &PayoutEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.credit, CreditStatus::Failed(_)))
    }

    /// Returns whether every owed credit went through.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Returns the total amount actually credited.
    #[must_use]
    pub fn total_credited(&self) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.credit == CreditStatus::Credited)
            .map(|entry| entry.amount)
            .sum()
    }
}

/// Everything produced by finishing a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedGame {
    /// The persisted result.
    pub result: GameResult,
    /// The payout run, or `None` if payouts had already been processed.
    pub payouts: Option<PayoutReport>,
}
