//! Outcome and payout rules for a settled hand.

use core::cmp::Ordering;

use crate::hand::Hand;
use crate::result::HandOutcome;
use crate::score;

/// Decides the outcome of a player hand against the dealer's final hand.
///
/// A busted player hand loses even when the dealer also busts.
#[must_use]
pub fn settle(hand: &Hand, dealer: &Hand) -> HandOutcome {
    if hand.is_bust() {
        return HandOutcome::Lose;
    }

    match score::compare_hands(hand.cards(), dealer.cards()) {
        Ordering::Greater if hand.is_blackjack() => HandOutcome::Blackjack,
        Ordering::Greater => HandOutcome::Win,
        Ordering::Equal => HandOutcome::Push,
        Ordering::Less => HandOutcome::Lose,
    }
}

/// Returns the amount paid back on `stake` for an outcome, stake included.
///
/// Blackjack pays 3:2 with the bonus truncated to a whole unit.
#[must_use]
pub const fn payout(outcome: HandOutcome, stake: u64) -> u64 {
    match outcome {
        HandOutcome::Win => stake.saturating_mul(2),
        HandOutcome::Blackjack => stake.saturating_mul(2).saturating_add(stake / 2),
        HandOutcome::Push => stake,
        HandOutcome::Lose => 0,
    }
}

/// Returns the amount paid back on an insurance stake.
///
/// Insurance pays 2:1 when the dealer holds blackjack and is lost otherwise.
#[must_use]
pub const fn insurance_payout(stake: u64, dealer_blackjack: bool) -> u64 {
    if dealer_blackjack {
        stake.saturating_mul(3)
    } else {
        0
    }
}
