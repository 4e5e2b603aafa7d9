extern crate alloc;

use alloc::string::{String, ToString};
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::{BetError, DealError};
use crate::hand::Hand;
use crate::repository::Repository;
use crate::wallet::Wallet;

use super::{Game, Phase, Table};

impl Table {
    fn all_bets_placed(&self) -> bool {
        self.player_order
            .iter()
            .all(|id| self.bets.contains_key(id))
    }

    /// Moves the betting index to the next player without a bet, wrapping
    /// around. Stays put once everyone has bet.
    fn advance_betting_player(&mut self) {
        let count = self.player_order.len();
        for step in 1..=count {
            let index = (self.current_betting_player + step) % count;
            if !self.bets.contains_key(&self.player_order[index]) {
                self.current_betting_player = index;
                return;
            }
        }
    }

    /// Moves the game from dealing into the first phase that needs input.
    fn open_after_deal(&mut self, special_bets: bool) {
        if special_bets {
            self.thread_special_phases(Phase::SpecialBets);
        } else {
            self.begin_playing();
        }
    }
}

impl<R: Repository, W: Wallet> Game<R, W> {
    /// Places a bet for the player whose turn it is to bet.
    ///
    /// The stake is collected from the wallet, taking a standard loan first
    /// if the balance is short. When this was the last outstanding bet the
    /// initial cards are dealt in the same call.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the betting phase, the player
    /// is unknown or out of turn, the bet is zero, the player already bet, or
    /// the stake cannot be collected; in those cases no bet is recorded. If dealing fails after
    /// the last bet, the bet stays recorded, the phase stays `Betting`, and
    /// [`Game::deal`] can be retried.
    pub fn place_bet(&self, player_id: &str, amount: u64) -> Result<(), BetError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        match table.phase {
            Phase::Waiting => return Err(BetError::GameNotStarted),
            Phase::Betting => {}
            _ => return Err(BetError::InvalidAction),
        }
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if !table.seats.contains_key(player_id) {
            return Err(BetError::PlayerNotFound);
        }
        if table.bets.contains_key(player_id) {
            return Err(BetError::AlreadyBet);
        }
        if table.seat_at(table.current_betting_player) != Some(player_id) {
            return Err(BetError::NotYourTurn);
        }

        self.ensure_stake(player_id, amount)?;

        let previous_index = table.current_betting_player;
        table.bets.insert(player_id.to_string(), amount);
        table.advance_betting_player();

        if let Err(err) = self.wallet.remove_funds(player_id, amount, "blackjack bet") {
            table.bets.remove(player_id);
            table.current_betting_player = previous_index;
            tracing::warn!(
                channel = %self.channel_id,
                player = player_id,
                amount,
                ?err,
                "bet debit failed, rolled back"
            );
            return Err(err.into());
        }

        tracing::debug!(
            channel = %self.channel_id,
            player = player_id,
            amount,
            "bet placed"
        );

        if table.all_bets_placed() {
            self.deal_table(table)?;
        }
        Ok(())
    }

    /// Deals the initial cards once every player has bet.
    ///
    /// [`Game::place_bet`] calls this automatically; it is public so a failed
    /// deal can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the betting phase, bets are
    /// outstanding, or the channel's shoe cannot be loaded or saved. Nothing
    /// is dealt on error.
    pub fn deal(&self) -> Result<(), DealError> {
        let mut guard = self.table.lock();
        self.deal_table(&mut guard)
    }

    fn deal_table(&self, table: &mut Table) -> Result<(), DealError> {
        if table.phase != Phase::Betting {
            return Err(DealError::InvalidAction);
        }
        if !table.all_bets_placed() {
            return Err(DealError::BetsOutstanding);
        }

        // Deal on copies and commit only after the shoe is saved.
        let mut shoe = self.load_shoe(&mut table.rng)?;
        let mut seats: HashMap<String, Hand> = table
            .player_order
            .iter()
            .map(|id| (id.clone(), Hand::new()))
            .collect();
        let mut dealer = Hand::new();

        for _ in 0..2 {
            for id in &table.player_order {
                let card = shoe.draw(&mut table.rng);
                if let Some(hand) = seats.get_mut(id) {
                    hand.add_card(card)?;
                }
            }
        }
        for _ in 0..2 {
            dealer.add_card(shoe.draw(&mut table.rng))?;
        }

        self.repository.save_deck(&self.channel_id, &shoe.to_vec())?;

        table.phase = Phase::Dealing;
        table.insurance_open =
            self.options.insurance && dealer.up_card().is_some_and(Card::is_ace);
        table.seats = seats;
        table.dealer = dealer;
        table.shoe = shoe;

        tracing::info!(
            channel = %self.channel_id,
            game = self.id,
            seats = table.player_order.len(),
            cards_remaining = table.shoe.len(),
            "initial cards dealt"
        );

        table.open_after_deal(self.options.special_bets);
        tracing::debug!(channel = %self.channel_id, phase = ?table.phase, "phase changed");
        Ok(())
    }
}
