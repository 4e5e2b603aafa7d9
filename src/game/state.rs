//! Game phase types.

/// Phase of a channel's game.
///
/// Phases only move forward. The special-bet phases are skipped unless
/// enabled in the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Waiting for players to join.
    Waiting,
    /// Collecting bets in turn order.
    Betting,
    /// Dealing the initial cards.
    Dealing,
    /// Offering double-down and insurance.
    SpecialBets,
    /// Offering splits on pairs.
    Splitting,
    /// Players hit or stand in turn order.
    Playing,
    /// Dealer plays out the hand.
    Dealer,
    /// Game is over; results and payouts can be produced.
    Complete,
}
