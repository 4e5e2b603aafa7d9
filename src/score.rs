//! Hand scoring rules shared by players and the dealer.
//!
//! Every function here is pure over a card slice, so the same rules apply to
//! live hands, dealer hands, and hands rebuilt from a persisted snapshot.

use core::cmp::Ordering;

use crate::card::Card;

/// Highest total a hand may reach without busting.
pub const BLACKJACK: u8 = 21;

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
            value = value.saturating_add(11);
        } else {
            value = value.saturating_add(card.value());
        }
    }

    while value > BLACKJACK && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= BLACKJACK;
    (value, is_soft)
}

/// Returns the best score of the cards.
///
/// Aces count 11 as long as the total stays at or under 21 and fall back to
/// 1 one at a time otherwise, so the result is the largest total not above 21
/// whenever such an assignment exists.
#[must_use]
pub fn best_score(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether an ace is still counted as 11 in the best score.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// Returns whether the cards are a natural: exactly two cards totalling 21.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && best_score(cards) == BLACKJACK
}

/// Returns whether every ace assignment puts the cards over 21.
#[must_use]
pub fn is_bust(cards: &[Card]) -> bool {
    best_score(cards) > BLACKJACK
}

/// Compares hand `a` against hand `b`.
///
/// A blackjack beats any other hand, including a multi-card 21. Two busted
/// hands tie, a single busted hand loses, and everything else is decided by
/// best score.
#[must_use]
pub fn compare_hands(a: &[Card], b: &[Card]) -> Ordering {
    let a_blackjack = is_blackjack(a);
    let b_blackjack = is_blackjack(b);
    if a_blackjack != b_blackjack {
        return if a_blackjack {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    match (is_bust(a), is_bust(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => best_score(a).cmp(&best_score(b)),
    }
}
