//! Double-down, insurance, and split offers between dealing and play.
//!
//! The `SpecialBets` phase offers double-down and insurance seat by seat, then
//! `Splitting` offers a split to every seat holding a pair. A phase with no
//! eligible seat is skipped. Every accepted offer is funded before the game
//! records it, and undone if the wallet refuses the debit.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use crate::card::Card;
use crate::error::SpecialBetError;
use crate::hand::{DoubleDownInfo, Hand, InsuranceInfo, SplitInfo};
use crate::repository::Repository;
use crate::wallet::Wallet;

use super::{Game, Phase, Table};

impl Table {
    fn insurance_stake(&self, seat_id: &str) -> u64 {
        self.bets.get(seat_id).copied().unwrap_or(0) / 2
    }

    fn can_insure(&self, seat_id: &str) -> bool {
        self.insurance_open
            && self.insurance_stake(seat_id) > 0
            && self
                .seats
                .get(seat_id)
                .is_some_and(|hand| hand.is_playing() && hand.insurance().is_none())
    }

    fn eligible_for(&self, phase: Phase, seat_id: &str) -> bool {
        let Some(hand) = self.seats.get(seat_id) else {
            return false;
        };
        match phase {
            Phase::SpecialBets => hand.can_double_down() || self.can_insure(seat_id),
            Phase::Splitting => hand.can_split(),
            _ => false,
        }
    }

    fn next_eligible_seat(&self, phase: Phase, from: usize) -> Option<usize> {
        (from..self.player_order.len())
            .find(|&index| self.eligible_for(phase, &self.player_order[index]))
    }

    /// Opens `phase` at its first eligible seat, falling through to the next
    /// special phase and finally to play when nobody is eligible.
    pub(super) fn thread_special_phases(&mut self, phase: Phase) {
        let mut candidate = Some(phase);
        while let Some(phase) = candidate {
            if let Some(index) = self.next_eligible_seat(phase, 0) {
                self.phase = phase;
                self.current_special_bets_turn = index;
                return;
            }
            candidate = match phase {
                Phase::SpecialBets => Some(Phase::Splitting),
                _ => None,
            };
        }
        self.begin_playing();
    }

    /// Passes the offer to the next eligible seat of the current phase.
    fn advance_special_turn(&mut self) {
        let from = self.current_special_bets_turn + 1;
        if let Some(index) = self.next_eligible_seat(self.phase, from) {
            self.current_special_bets_turn = index;
        } else if self.phase == Phase::SpecialBets {
            self.thread_special_phases(Phase::Splitting);
        } else {
            self.begin_playing();
        }
    }

    fn ensure_special_turn(&self, phase: Phase, player_id: &str) -> Result<&Hand, SpecialBetError> {
        if self.phase == Phase::Waiting {
            return Err(SpecialBetError::GameNotStarted);
        }
        if self.phase != phase {
            return Err(SpecialBetError::InvalidAction);
        }

        let hand = self
            .seats
            .get(player_id)
            .ok_or(SpecialBetError::PlayerNotFound)?;

        if self.seat_at(self.current_special_bets_turn) != Some(player_id) {
            return Err(SpecialBetError::NotYourTurn);
        }

        hand.ensure_playing()?;
        Ok(hand)
    }

    fn seat_mut(&mut self, seat_id: &str) -> Result<&mut Hand, SpecialBetError> {
        self.seats
            .get_mut(seat_id)
            .ok_or(SpecialBetError::PlayerNotFound)
    }
}

impl<R: Repository, W: Wallet> Game<R, W> {
    /// Doubles the stake on a two-card hand and deals exactly one more card.
    ///
    /// The hand stands automatically unless the card busts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not offering special bets, the player
    /// is unknown or out of turn, the hand cannot double, no bet is recorded,
    /// or the extra stake cannot be collected.
    pub fn double_down(&self, player_id: &str) -> Result<Card, SpecialBetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        let hand = table.ensure_special_turn(Phase::SpecialBets, player_id)?;
        if !hand.can_double_down() {
            return Err(SpecialBetError::CannotDouble);
        }
        let amount = table
            .bets
            .get(player_id)
            .copied()
            .ok_or(SpecialBetError::NoBet)?;
        let owner = table.owner_of(player_id).to_string();

        self.ensure_stake(&owner, amount)?;
        table
            .seat_mut(player_id)?
            .set_double_down(Some(DoubleDownInfo { amount }));

        if let Err(err) = self.wallet.remove_funds(&owner, amount, "blackjack double down") {
            table.seat_mut(player_id)?.set_double_down(None);
            tracing::warn!(
                channel = %self.channel_id,
                player = player_id,
                amount,
                ?err,
                "double down debit failed, rolled back"
            );
            return Err(err.into());
        }

        let card = table.draw();
        let hand = table.seat_mut(player_id)?;
        hand.add_card(card)?;
        if hand.is_playing() {
            hand.stand()?;
        }

        tracing::debug!(
            channel = %self.channel_id,
            player = player_id,
            amount,
            score = hand.score(),
            status = ?hand.status(),
            "double down"
        );

        table.advance_special_turn();
        Ok(card)
    }

    /// Places an insurance bet of half the original stake against a dealer Ace.
    ///
    /// The seat keeps the offer while it can still double down; otherwise the
    /// turn moves on. Returns the insurance stake.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not offering special bets, the player
    /// is unknown or out of turn, insurance is not available, no bet is
    /// recorded, or the stake cannot be collected.
    pub fn place_insurance(&self, player_id: &str) -> Result<u64, SpecialBetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        table.ensure_special_turn(Phase::SpecialBets, player_id)?;
        if !table.bets.contains_key(player_id) {
            return Err(SpecialBetError::NoBet);
        }
        if !table.can_insure(player_id) {
            return Err(SpecialBetError::CannotInsure);
        }
        let amount = table.insurance_stake(player_id);
        let owner = table.owner_of(player_id).to_string();

        self.ensure_stake(&owner, amount)?;
        table
            .seat_mut(player_id)?
            .set_insurance(Some(InsuranceInfo { amount }));

        if let Err(err) = self.wallet.remove_funds(&owner, amount, "blackjack insurance") {
            table.seat_mut(player_id)?.set_insurance(None);
            tracing::warn!(
                channel = %self.channel_id,
                player = player_id,
                amount,
                ?err,
                "insurance debit failed, rolled back"
            );
            return Err(err.into());
        }

        tracing::debug!(channel = %self.channel_id, player = player_id, amount, "insurance placed");

        if !table.eligible_for(Phase::SpecialBets, player_id) {
            table.advance_special_turn();
        }
        Ok(amount)
    }

    /// Passes on the double-down and insurance offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not offering special bets, or the
    /// player is unknown or out of turn.
    pub fn decline_special_bet(&self, player_id: &str) -> Result<(), SpecialBetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        table.ensure_special_turn(Phase::SpecialBets, player_id)?;
        table.advance_special_turn();

        tracing::debug!(channel = %self.channel_id, player = player_id, "special bet declined");
        Ok(())
    }

    /// Splits a pair into two hands, each with the original stake.
    ///
    /// The second card moves to a new seat `"<player>/split"` placed right
    /// after the player in turn order, and each hand is dealt one card.
    /// Returns the cards dealt to the original and the new hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not offering splits, the player is
    /// unknown or out of turn, the hand is not a splittable pair, no bet is
    /// recorded, or the stake cannot be collected.
    pub fn split(&self, player_id: &str) -> Result<(Card, Card), SpecialBetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        let hand = table.ensure_special_turn(Phase::Splitting, player_id)?;
        if !hand.can_split() {
            return Err(SpecialBetError::CannotSplit);
        }
        let amount = table
            .bets
            .get(player_id)
            .copied()
            .ok_or(SpecialBetError::NoBet)?;

        let child_id = split_seat_id(player_id);
        if table.seats.contains_key(&child_id) {
            return Err(SpecialBetError::CannotSplit);
        }

        self.ensure_stake(player_id, amount)?;

        let link = SplitInfo {
            parent_id: player_id.to_string(),
            child_id: child_id.clone(),
        };
        let parent = table.seat_mut(player_id)?;
        let moved = parent.take_split_card().ok_or(SpecialBetError::CannotSplit)?;
        parent.set_split(Some(link.clone()));

        let position = table.current_special_bets_turn + 1;
        table.player_order.insert(position, child_id.clone());
        table
            .seats
            .insert(child_id.clone(), Hand::from_split(moved, link));
        table.bets.insert(child_id.clone(), amount);

        if let Err(err) = self.wallet.remove_funds(player_id, amount, "blackjack split") {
            table.bets.remove(&child_id);
            table.seats.remove(&child_id);
            table.player_order.remove(position);
            let parent = table.seat_mut(player_id)?;
            parent.restore_split_card(moved);
            parent.set_split(None);
            tracing::warn!(
                channel = %self.channel_id,
                player = player_id,
                amount,
                ?err,
                "split debit failed, rolled back"
            );
            return Err(err.into());
        }

        let first = table.draw();
        table.seat_mut(player_id)?.add_card(first)?;
        let second = table.draw();
        table.seat_mut(&child_id)?.add_card(second)?;

        tracing::debug!(
            channel = %self.channel_id,
            player = player_id,
            sibling = %child_id,
            amount,
            "hand split"
        );

        table.advance_special_turn();
        Ok((first, second))
    }

    /// Passes on the split offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not offering splits, or the player is
    /// unknown or out of turn.
    pub fn decline_split(&self, player_id: &str) -> Result<(), SpecialBetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        table.ensure_special_turn(Phase::Splitting, player_id)?;
        table.advance_special_turn();

        tracing::debug!(channel = %self.channel_id, player = player_id, "split declined");
        Ok(())
    }
}

pub(super) const SPLIT_SUFFIX: &str = "/split";

/// Returns the seat id given to the sibling hand of a split.
#[must_use]
pub fn split_seat_id(player_id: &str) -> String {
    format!("{player_id}{SPLIT_SUFFIX}")
}
