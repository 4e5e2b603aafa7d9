//! Shared test doubles and shoe helpers.

#![expect(dead_code, reason = "each test binary uses a different subset of these helpers")]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use bjengine::{
    Card, Game, GameOptions, GameResult, MemoryRepository, Repository, RepositoryError, Suit,
    Wallet, WalletAccount, WalletError,
};

pub const CHANNEL: &str = "table-1";
pub const LOAN: u64 = 1000;

const SHOE_LEN: usize = 100;

pub const fn card(rank: u8) -> Card {
    Card::new(Suit::Spades, rank)
}

pub fn cards(ranks: &[u8]) -> Vec<Card> {
    ranks.iter().copied().map(card).collect()
}

/// Builds a shoe that deals `draws` first, followed by low filler cards.
pub fn stacked(draws: &[Card]) -> Vec<Card> {
    let mut shoe = draws.to_vec();
    while shoe.len() < SHOE_LEN {
        shoe.push(Card::new(Suit::Clubs, 2));
    }
    shoe
}

pub fn seed_shoe(repository: &impl Repository, ranks: &[u8]) {
    repository
        .save_deck(CHANNEL, &stacked(&cards(ranks)))
        .unwrap();
}

/// Seats `players` and opens betting.
pub fn started<R: Repository, W: Wallet>(
    repository: R,
    wallet: W,
    options: GameOptions,
    players: &[&str],
) -> Game<R, W> {
    let game = Game::new(CHANNEL, options, 7, repository, wallet);
    for player in players {
        game.add_player(player).unwrap();
    }
    game.start().unwrap();
    game
}

/// Seats `players`, deals from a shoe stacked with `ranks`, and has every
/// player bet `bet`.
pub fn dealt<'a>(
    repository: &'a MemoryRepository,
    wallet: &'a MockWallet,
    options: GameOptions,
    players: &[&str],
    ranks: &[u8],
    bet: u64,
) -> Game<&'a MemoryRepository, &'a MockWallet> {
    seed_shoe(repository, ranks);
    let game = started(repository, wallet, options, players);
    for player in players {
        game.place_bet(player, bet).unwrap();
    }
    game
}

/// Wallet double that records every credit, debit, and loan.
#[derive(Default)]
pub struct MockWallet {
    starting_balance: u64,
    balances: RefCell<HashMap<String, u64>>,
    pub credits: RefCell<Vec<(String, u64)>>,
    pub debits: RefCell<Vec<(String, u64)>>,
    pub loans: RefCell<Vec<(String, u64)>>,
    pub fail_debits: Cell<bool>,
    pub fail_credits_for: RefCell<Option<String>>,
}

impl MockWallet {
    pub fn with_balance(starting_balance: u64) -> Self {
        Self {
            starting_balance,
            ..Self::default()
        }
    }

    pub fn balance(&self, user_id: &str) -> u64 {
        self.balances
            .borrow()
            .get(user_id)
            .copied()
            .unwrap_or(self.starting_balance)
    }

    pub fn credit_count(&self) -> usize {
        self.credits.borrow().len()
    }

    pub fn debited(&self, user_id: &str) -> u64 {
        self.debits
            .borrow()
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, amount)| amount)
            .sum()
    }

    fn account(&self, user_id: &str) -> WalletAccount {
        WalletAccount {
            user_id: user_id.to_string(),
            balance: self.balance(user_id),
            outstanding_loans: self
                .loans
                .borrow()
                .iter()
                .filter(|(user, _)| user == user_id)
                .map(|(_, amount)| amount)
                .sum(),
        }
    }
}

impl Wallet for MockWallet {
    fn get_or_create_wallet(&self, user_id: &str) -> Result<(WalletAccount, bool), WalletError> {
        let created = !self.balances.borrow().contains_key(user_id);
        if created {
            self.balances
                .borrow_mut()
                .insert(user_id.to_string(), self.starting_balance);
        }
        Ok((self.account(user_id), created))
    }

    fn add_funds(&self, user_id: &str, amount: u64, _description: &str) -> Result<(), WalletError> {
        if self.fail_credits_for.borrow().as_deref() == Some(user_id) {
            return Err(WalletError::Backend("credit refused".to_string()));
        }
        let balance = self.balance(user_id) + amount;
        self.balances
            .borrow_mut()
            .insert(user_id.to_string(), balance);
        self.credits
            .borrow_mut()
            .push((user_id.to_string(), amount));
        Ok(())
    }

    fn remove_funds(
        &self,
        user_id: &str,
        amount: u64,
        _description: &str,
    ) -> Result<(), WalletError> {
        if self.fail_debits.get() {
            return Err(WalletError::Backend("debit refused".to_string()));
        }
        let available = self.balance(user_id);
        if available < amount {
            return Err(WalletError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        self.balances
            .borrow_mut()
            .insert(user_id.to_string(), available - amount);
        self.debits
            .borrow_mut()
            .push((user_id.to_string(), amount));
        Ok(())
    }

    fn ensure_funds_with_loan(
        &self,
        user_id: &str,
        required: u64,
        loan_amount: u64,
    ) -> Result<(WalletAccount, bool), WalletError> {
        let mut loan_given = false;
        if self.balance(user_id) < required {
            let balance = self.balance(user_id) + loan_amount;
            self.balances
                .borrow_mut()
                .insert(user_id.to_string(), balance);
            self.loans
                .borrow_mut()
                .push((user_id.to_string(), loan_amount));
            loan_given = true;
        }

        let available = self.balance(user_id);
        if available < required {
            return Err(WalletError::InsufficientFunds {
                required,
                available,
            });
        }
        Ok((self.account(user_id), loan_given))
    }

    fn standard_loan_increment(&self) -> u64 {
        LOAN
    }
}

/// Repository double whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: MemoryRepository,
    pub fail_deck_saves: Cell<bool>,
    pub fail_result_saves: Cell<bool>,
}

impl Repository for FlakyRepository {
    fn save_deck(&self, channel_id: &str, cards: &[Card]) -> Result<(), RepositoryError> {
        if self.fail_deck_saves.get() {
            return Err(RepositoryError::Backend("deck store offline".to_string()));
        }
        self.inner.save_deck(channel_id, cards)
    }

    fn get_deck(&self, channel_id: &str) -> Result<Option<Vec<Card>>, RepositoryError> {
        self.inner.get_deck(channel_id)
    }

    fn save_game_result(&self, result: &GameResult) -> Result<(), RepositoryError> {
        if self.fail_result_saves.get() {
            return Err(RepositoryError::Backend("result store offline".to_string()));
        }
        self.inner.save_game_result(result)
    }

    fn get_player_results(&self, player_id: &str) -> Result<Vec<GameResult>, RepositoryError> {
        self.inner.get_player_results(player_id)
    }

    fn get_channel_results(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<GameResult>, RepositoryError> {
        self.inner.get_channel_results(channel_id, limit)
    }
}
