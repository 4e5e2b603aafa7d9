//! Game engine and state management.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::{RepositoryError, TableError, WalletError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::repository::Repository;
use crate::result::GameResult;
use crate::shoe::Shoe;
use crate::sync::Mutex;
use crate::wallet::Wallet;

mod actions;
mod bet;
mod dealer;
mod special;
pub mod state;

use special::SPLIT_SUFFIX;
pub use special::split_seat_id;
pub use state::Phase;

/// Mutable round state, always accessed under the game's lock.
struct Table {
    phase: Phase,
    shoe: Shoe,
    /// Seat id -> hand. Split siblings get their own seat.
    seats: HashMap<String, Hand>,
    /// Players in the order they joined.
    joined: Vec<String>,
    dealer: Hand,
    /// Turn order fixed at start, extended by splits.
    player_order: Vec<String>,
    current_betting_player: usize,
    current_turn: usize,
    current_special_bets_turn: usize,
    /// Seat id -> base bet.
    bets: HashMap<String, u64>,
    insurance_open: bool,
    payouts_processed: bool,
    /// Result persisted for this game, once produced.
    result: Option<GameResult>,
    rng: ChaCha8Rng,
}

impl Table {
    fn seat_at(&self, index: usize) -> Option<&str> {
        self.player_order.get(index).map(String::as_str)
    }

    fn draw(&mut self) -> Card {
        self.shoe.draw(&mut self.rng)
    }

    /// Returns the player who owns a seat; split siblings belong to their parent.
    fn owner_of<'a>(&'a self, seat_id: &'a str) -> &'a str {
        self.seats
            .get(seat_id)
            .and_then(Hand::split)
            .map_or(seat_id, |split| split.parent_id.as_str())
    }

    /// Returns the base bet plus any double-down on a seat.
    fn stake(&self, seat_id: &str) -> u64 {
        let bet = self.bets.get(seat_id).copied().unwrap_or(0);
        let doubled = self
            .seats
            .get(seat_id)
            .and_then(Hand::double_down)
            .map_or(0, |info| info.amount);
        bet.saturating_add(doubled)
    }

    fn all_players_done(&self) -> bool {
        self.player_order
            .iter()
            .all(|id| self.seats.get(id).is_none_or(|hand| !hand.is_playing()))
    }
}

/// A blackjack game bound to one channel.
///
/// The game owns its round state behind a single lock; every operation takes
/// that lock for its whole duration, so concurrent callers holding `&Game`
/// are serialized. Shoes and results go through the [`Repository`], stakes
/// and payouts through the [`Wallet`].
pub struct Game<R, W> {
    id: u64,
    channel_id: String,
    options: GameOptions,
    repository: R,
    wallet: W,
    table: Mutex<Table>,
}

impl<R, W> Game<R, W> {
    /// Creates a new game for a channel with the given seed.
    ///
    /// Every shuffle of the game draws from a `ChaCha8` generator seeded with
    /// `seed`, so equal seeds replay equal shoes.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::{Game, GameOptions, MemoryRepository, Phase};
    /// # use bjengine::{Wallet, WalletAccount, WalletError};
    /// # struct House;
    /// # impl Wallet for House {
    /// #     fn get_or_create_wallet(&self, user_id: &str) -> Result<(WalletAccount, bool), WalletError> {
    /// #         Ok((WalletAccount { user_id: user_id.into(), balance: 0, outstanding_loans: 0 }, false))
    /// #     }
    /// #     fn add_funds(&self, _: &str, _: u64, _: &str) -> Result<(), WalletError> { Ok(()) }
    /// #     fn remove_funds(&self, _: &str, _: u64, _: &str) -> Result<(), WalletError> { Ok(()) }
    /// #     fn ensure_funds_with_loan(&self, user_id: &str, _: u64, _: u64) -> Result<(WalletAccount, bool), WalletError> {
    /// #         self.get_or_create_wallet(user_id)
    /// #     }
    /// #     fn standard_loan_increment(&self) -> u64 { 1000 }
    /// # }
    ///
    /// let game = Game::new("lobby", GameOptions::default(), 42, MemoryRepository::new(), House);
    /// assert_eq!(game.phase(), Phase::Waiting);
    /// ```
    pub fn new(
        channel_id: impl Into<String>,
        options: GameOptions,
        seed: u64,
        repository: R,
        wallet: W,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let id = rng.next_u64();
        let decks = options.decks;

        Self {
            id,
            channel_id: channel_id.into(),
            options,
            repository,
            wallet,
            table: Mutex::new(Table {
                phase: Phase::Waiting,
                shoe: Shoe::from_cards(Vec::new(), decks),
                seats: HashMap::new(),
                joined: Vec::new(),
                dealer: Hand::new(),
                player_order: Vec::new(),
                current_betting_player: 0,
                current_turn: 0,
                current_special_bets_turn: 0,
                bets: HashMap::new(),
                insurance_open: false,
                payouts_processed: false,
                result: None,
                rng,
            }),
        }
    }

    /// Returns the game id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the channel the game is bound to.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Returns the house rules.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the repository collaborator.
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the wallet collaborator.
    pub const fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.table.lock().phase
    }

    /// Returns the seated players in join order.
    pub fn players(&self) -> Vec<String> {
        self.table.lock().joined.clone()
    }

    /// Returns the turn order, including split siblings.
    pub fn player_order(&self) -> Vec<String> {
        self.table.lock().player_order.clone()
    }

    /// Returns the player expected to bet next.
    ///
    /// Returns `None` outside the betting phase.
    pub fn current_betting_player(&self) -> Option<String> {
        let table = self.table.lock();
        if table.phase != Phase::Betting {
            return None;
        }
        table.seat_at(table.current_betting_player).map(ToString::to_string)
    }

    /// Returns the seat whose special-bet decision is pending.
    ///
    /// Returns `None` outside the special-bet phases.
    pub fn current_special_bets_player(&self) -> Option<String> {
        let table = self.table.lock();
        if !matches!(table.phase, Phase::SpecialBets | Phase::Splitting) {
            return None;
        }
        table
            .seat_at(table.current_special_bets_turn)
            .map(ToString::to_string)
    }

    /// Returns the seat whose turn it is to hit or stand.
    ///
    /// Returns `None` outside the playing phase or once every seat is done.
    pub fn current_player(&self) -> Option<String> {
        let table = self.table.lock();
        if table.phase != Phase::Playing {
            return None;
        }
        let seat = table.seat_at(table.current_turn)?;
        table
            .seats
            .get(seat)
            .filter(|hand| hand.is_playing())
            .map(|_| seat.to_string())
    }

    /// Returns a copy of a seat's hand.
    pub fn hand(&self, seat_id: &str) -> Option<Hand> {
        self.table.lock().seats.get(seat_id).cloned()
    }

    /// Returns a copy of the dealer's hand.
    pub fn dealer_hand(&self) -> Hand {
        self.table.lock().dealer.clone()
    }

    /// Returns the base bet recorded for a seat.
    pub fn bet(&self, seat_id: &str) -> Option<u64> {
        self.table.lock().bets.get(seat_id).copied()
    }

    /// Returns the number of cards left in the in-play shoe.
    pub fn cards_remaining(&self) -> usize {
        self.table.lock().shoe.len()
    }

    /// Returns whether payouts have already been processed.
    pub fn payouts_processed(&self) -> bool {
        self.table.lock().payouts_processed
    }

    /// Returns whether every seat has busted or stood.
    pub fn check_all_players_done(&self) -> bool {
        self.table.lock().all_players_done()
    }
}

impl<R: Repository, W: Wallet> Game<R, W> {
    /// Seats a player, opening a wallet for them if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has left the waiting phase, the player
    /// is already seated, the id ends with the split suffix, or the wallet
    /// cannot be opened.
    pub fn add_player(&self, player_id: &str) -> Result<(), TableError> {
        let mut table = self.table.lock();
        if table.phase != Phase::Waiting {
            return Err(TableError::GameInProgress);
        }
        if table.seats.contains_key(player_id) {
            return Err(TableError::AlreadySeated);
        }
        if player_id.ends_with(SPLIT_SUFFIX) {
            return Err(TableError::ReservedSeatId);
        }

        let (account, created) = self.wallet.get_or_create_wallet(player_id)?;
        if created {
            tracing::info!(player = player_id, balance = account.balance, "wallet opened");
        }

        table.seats.insert(player_id.to_string(), Hand::new());
        table.joined.push(player_id.to_string());
        tracing::debug!(
            channel = %self.channel_id,
            player = player_id,
            seated = table.joined.len(),
            "player seated"
        );
        Ok(())
    }

    /// Starts the betting phase.
    ///
    /// Fixes the turn order from the seated players and makes sure the
    /// channel has a persisted shoe.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has already started, nobody is seated, or
    /// the channel's shoe cannot be loaded or saved. The phase is unchanged
    /// on error.
    pub fn start(&self) -> Result<(), TableError> {
        let mut table = self.table.lock();
        if table.phase != Phase::Waiting {
            return Err(TableError::GameInProgress);
        }
        if table.joined.is_empty() {
            return Err(TableError::NoPlayers);
        }

        table.shoe = self.load_shoe(&mut table.rng)?;
        table.player_order = table.joined.clone();
        table.current_betting_player = 0;
        table.phase = Phase::Betting;

        tracing::info!(
            channel = %self.channel_id,
            game = self.id,
            players = table.player_order.len(),
            "betting opened"
        );
        Ok(())
    }

    /// Loads the channel's shoe, replacing and persisting a fresh one when
    /// none exists or too few cards remain.
    fn load_shoe(&self, rng: &mut ChaCha8Rng) -> Result<Shoe, RepositoryError> {
        let decks = self.options.decks;
        let stored = self
            .repository
            .get_deck(&self.channel_id)?
            .map(|cards| Shoe::from_cards(cards, decks));

        match stored {
            Some(shoe)
                if !shoe.is_empty() && !shoe.needs_reshuffle(self.options.reshuffle_threshold) =>
            {
                Ok(shoe)
            }
            stored => {
                let shoe = Shoe::new(decks, rng);
                self.repository.save_deck(&self.channel_id, &shoe.to_vec())?;
                tracing::info!(
                    channel = %self.channel_id,
                    previous = stored.as_ref().map_or(0, Shoe::len),
                    cards = shoe.len(),
                    "fresh shoe created"
                );
                Ok(shoe)
            }
        }
    }

    /// Makes sure `player_id` can cover `amount`, taking a standard loan if
    /// the balance is short.
    fn ensure_stake(&self, player_id: &str, amount: u64) -> Result<(), WalletError> {
        let loan = self.wallet.standard_loan_increment();
        let (account, loan_given) = self.wallet.ensure_funds_with_loan(player_id, amount, loan)?;
        if loan_given {
            tracing::info!(
                player = player_id,
                loan,
                balance = account.balance,
                "loan granted to cover stake"
            );
        }
        Ok(())
    }
}
