//! Persistence collaborator consumed by the engine.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::RepositoryError;
use crate::result::GameResult;
use crate::sync::Mutex;

/// Storage for channel shoes and finished game results.
pub trait Repository {
    /// Stores the shoe for a channel, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save_deck(&self, channel_id: &str, cards: &[Card]) -> Result<(), RepositoryError>;

    /// Loads the shoe for a channel, or `None` when the channel has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_deck(&self, channel_id: &str) -> Result<Option<Vec<Card>>, RepositoryError>;

    /// Appends a finished game result.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save_game_result(&self, result: &GameResult) -> Result<(), RepositoryError>;

    /// Returns every result a player took part in, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_player_results(&self, player_id: &str) -> Result<Vec<GameResult>, RepositoryError>;

    /// Returns up to `limit` results for a channel, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_channel_results(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<GameResult>, RepositoryError>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn save_deck(&self, channel_id: &str, cards: &[Card]) -> Result<(), RepositoryError> {
        (**self).save_deck(channel_id, cards)
    }

    fn get_deck(&self, channel_id: &str) -> Result<Option<Vec<Card>>, RepositoryError> {
        (**self).get_deck(channel_id)
    }

    fn save_game_result(&self, result: &GameResult) -> Result<(), RepositoryError> {
        (**self).save_game_result(result)
    }

    fn get_player_results(&self, player_id: &str) -> Result<Vec<GameResult>, RepositoryError> {
        (**self).get_player_results(player_id)
    }

    fn get_channel_results(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<GameResult>, RepositoryError> {
        (**self).get_channel_results(channel_id, limit)
    }
}

/// In-memory [`Repository`] keeping every shoe and result for the process
/// lifetime.
#[derive(Default)]
pub struct MemoryRepository {
    decks: Mutex<HashMap<String, Vec<Card>>>,
    results: Mutex<Vec<GameResult>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored results.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.lock().len()
    }
}

impl Repository for MemoryRepository {
    fn save_deck(&self, channel_id: &str, cards: &[Card]) -> Result<(), RepositoryError> {
        self.decks
            .lock()
            .insert(channel_id.to_string(), cards.to_vec());
        Ok(())
    }

    fn get_deck(&self, channel_id: &str) -> Result<Option<Vec<Card>>, RepositoryError> {
        Ok(self.decks.lock().get(channel_id).cloned())
    }

    fn save_game_result(&self, result: &GameResult) -> Result<(), RepositoryError> {
        self.results.lock().push(result.clone());
        Ok(())
    }

    fn get_player_results(&self, player_id: &str) -> Result<Vec<GameResult>, RepositoryError> {
        Ok(self
            .results
            .lock()
            .iter()
            .filter(|result| result.seats.iter().any(|seat| seat.player_id == player_id))
            .cloned()
            .collect())
    }

    fn get_channel_results(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<GameResult>, RepositoryError> {
        Ok(self
            .results
            .lock()
            .iter()
            .rev()
            .filter(|result| result.channel_id == channel_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
