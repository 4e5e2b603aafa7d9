//! Multi-deck shoe with seeded shuffling.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Suit};

/// An ordered pool of cards drawn from the front.
///
/// Running dry never fails a draw: the shoe is replaced by a brand-new
/// shuffled one and drawing continues.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
    decks: u8,
}

impl Shoe {
    /// Creates and shuffles a shoe with the specified number of decks.
    ///
    /// At least one deck is always used.
    pub fn new<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Self {
        Self {
            cards: fresh_cards(decks.max(1), rng).into(),
            decks: decks.max(1),
        }
    }

    /// Rebuilds a shoe from persisted cards, keeping their order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>, decks: u8) -> Self {
        Self {
            cards: cards.into(),
            decks: decks.max(1),
        }
    }

    /// Draws the front card, replacing the shoe first if it is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        loop {
            if let Some(card) = self.cards.pop_front() {
                return card;
            }
            tracing::debug!(decks = self.decks, "shoe exhausted, replacing");
            self.replace(rng);
        }
    }

    /// Replaces the shoe with a brand-new shuffled one.
    pub fn replace<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = fresh_cards(self.decks, rng).into();
    }

    /// Returns whether fewer than `threshold` cards remain.
    #[must_use]
    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards in draw order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

fn fresh_cards<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Vec<Card> {
    let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in 1..=13 {
                cards.push(Card::new(suit, rank));
            }
        }
    }

    cards.shuffle(rng);
    cards
}
