use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::repository::Repository;
use crate::wallet::Wallet;

use super::{Game, Phase, Table};

impl Table {
    fn ensure_player_turn(&self, player_id: &str) -> Result<(), ActionError> {
        match self.phase {
            Phase::Waiting => return Err(ActionError::GameNotStarted),
            Phase::Playing => {}
            _ => return Err(ActionError::InvalidAction),
        }

        let hand = self
            .seats
            .get(player_id)
            .ok_or(ActionError::PlayerNotFound)?;

        if self.seat_at(self.current_turn) != Some(player_id) {
            return Err(ActionError::NotYourTurn);
        }

        hand.ensure_playing()?;
        Ok(())
    }

    /// Enters the playing phase at the first seat still playing, or hands
    /// over to the dealer when there is none.
    pub(super) fn begin_playing(&mut self) {
        let first = self
            .player_order
            .iter()
            .position(|id| self.seats.get(id).is_some_and(Hand::is_playing));

        if let Some(index) = first {
            self.phase = Phase::Playing;
            self.current_turn = index;
        } else {
            self.phase = Phase::Dealer;
            self.current_turn = 0;
        }
    }

    /// Advances to the next seat still playing, wrapping around.
    ///
    /// The index is left alone when every seat is done.
    pub(super) fn advance_turn(&mut self) {
        let count = self.player_order.len();
        for step in 1..=count {
            let index = (self.current_turn + step) % count;
            let playing = self
                .seats
                .get(&self.player_order[index])
                .is_some_and(Hand::is_playing);
            if playing {
                self.current_turn = index;
                return;
            }
        }
    }
}

impl<R: Repository, W: Wallet> Game<R, W> {
    /// Player action: Hit (draw a card).
    ///
    /// An exhausted shoe is replaced by a fresh one. If the card busts the
    /// hand the turn moves on; a bust is reported through the hand status,
    /// not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the playing phase, the player
    /// is unknown or out of turn, or the hand is already finished.
    pub fn hit(&self, player_id: &str) -> Result<Card, ActionError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;
        table.ensure_player_turn(player_id)?;

        let card = table.draw();
        let hand = table
            .seats
            .get_mut(player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        hand.add_card(card)?;
        let score = hand.score();

        if hand.is_playing() {
            tracing::debug!(channel = %self.channel_id, player = player_id, score, "hit");
        } else {
            tracing::debug!(channel = %self.channel_id, player = player_id, score, "hit and bust");
            table.advance_turn();
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand) and pass the turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the playing phase, the player
    /// is unknown or out of turn, or the hand is already finished.
    pub fn stand(&self, player_id: &str) -> Result<(), ActionError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;
        table.ensure_player_turn(player_id)?;

        table
            .seats
            .get_mut(player_id)
            .ok_or(ActionError::PlayerNotFound)?
            .stand()?;
        table.advance_turn();

        tracing::debug!(channel = %self.channel_id, player = player_id, "stand");
        Ok(())
    }

    /// Moves the turn to the next seat still playing.
    ///
    /// This never changes the phase; check [`Game::check_all_players_done`]
    /// and call [`Game::play_dealer`] once every seat is finished.
    pub fn advance_turn(&self) {
        self.table.lock().advance_turn();
    }
}
