//! Seat and dealer hand representation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::HandError;
use crate::score;

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandStatus {
    /// Hand can still take cards.
    #[default]
    Playing,
    /// Hand went over 21.
    Bust,
    /// Hand has stood.
    Stand,
}

impl HandStatus {
    /// Returns whether the status is final.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Double-down taken on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleDownInfo {
    /// Extra stake collected for the double.
    pub amount: u64,
}

/// Link between the two hands produced by a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitInfo {
    /// Seat id of the original hand.
    pub parent_id: String,
    /// Seat id of the sibling hand created by the split.
    pub child_id: String,
}

/// Insurance side bet placed against a dealer Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceInfo {
    /// Insurance stake.
    pub amount: u64,
}

/// A hand of cards held by a seat or by the dealer.
///
/// The status only moves through [`Hand::add_card`] and [`Hand::stand`], and
/// never leaves `Bust` or `Stand` once reached.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    double_down: Option<DoubleDownInfo>,
    split: Option<SplitInfo>,
    insurance: Option<InsuranceInfo>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Playing,
            double_down: None,
            split: None,
            insurance: None,
        }
    }

    /// Creates the sibling hand of a split holding the moved card.
    pub(crate) fn from_split(card: Card, split: SplitInfo) -> Self {
        Self {
            cards: alloc::vec![card],
            split: Some(split),
            ..Self::new()
        }
    }

    /// Returns an error if the hand is already bust or standing.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::Bust`] or [`HandError::Stand`] for a finished hand.
    pub const fn ensure_playing(&self) -> Result<(), HandError> {
        match self.status {
            HandStatus::Playing => Ok(()),
            HandStatus::Bust => Err(HandError::Bust),
            HandStatus::Stand => Err(HandError::Stand),
        }
    }

    /// Adds a card to the hand, marking it bust when it goes over 21.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is already bust or standing. The cards
    /// are left untouched in that case.
    pub fn add_card(&mut self, card: Card) -> Result<(), HandError> {
        self.ensure_playing()?;
        self.cards.push(card);
        if score::is_bust(&self.cards) {
            self.status = HandStatus::Bust;
        }
        Ok(())
    }

    /// Stands on the hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is already bust or standing.
    pub fn stand(&mut self) -> Result<(), HandError> {
        self.ensure_playing()?;
        self.status = HandStatus::Stand;
        Ok(())
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns whether the hand can still take cards.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.status, HandStatus::Playing)
    }

    /// Returns the best score of the hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        score::best_score(&self.cards)
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        score::is_soft(&self.cards)
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        score::is_blackjack(&self.cards)
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        score::is_bust(&self.cards)
    }

    /// Returns the first card, which is the dealer's upcard.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the double-down taken on this hand, if any.
    #[must_use]
    pub const fn double_down(&self) -> Option<&DoubleDownInfo> {
        self.double_down.as_ref()
    }

    /// Returns the split link of this hand, if any.
    #[must_use]
    pub const fn split(&self) -> Option<&SplitInfo> {
        self.split.as_ref()
    }

    /// Returns the insurance placed on this hand, if any.
    #[must_use]
    pub const fn insurance(&self) -> Option<&InsuranceInfo> {
        self.insurance.as_ref()
    }

    /// Returns whether the hand may double down.
    #[must_use]
    pub fn can_double_down(&self) -> bool {
        self.is_playing()
            && self.cards.len() == 2
            && self.double_down.is_none()
            && self.split.is_none()
    }

    /// Returns whether the hand holds a pair that may be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.is_playing()
            && self.cards.len() == 2
            && self.cards[0].rank == self.cards[1].rank
            && self.double_down.is_none()
            && self.split.is_none()
    }

    pub(crate) fn set_double_down(&mut self, info: Option<DoubleDownInfo>) {
        self.double_down = info;
    }

    pub(crate) fn set_split(&mut self, info: Option<SplitInfo>) {
        self.split = info;
    }

    pub(crate) fn set_insurance(&mut self, info: Option<InsuranceInfo>) {
        self.insurance = info;
    }

    /// Removes and returns the second card (for splitting).
    pub(crate) fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Puts back a card removed by [`Hand::take_split_card`].
    pub(crate) fn restore_split_card(&mut self, card: Card) {
        self.cards.push(card);
    }
}
