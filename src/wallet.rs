//! Funds collaborator consumed by the engine.
//!
//! The engine never keeps balances itself. Stakes are collected through
//! [`Wallet::ensure_funds_with_loan`] followed by [`Wallet::remove_funds`], and
//! payouts go back out through [`Wallet::add_funds`].

extern crate alloc;

use alloc::string::String;

use crate::error::WalletError;

/// Snapshot of a user's wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    /// Owner of the wallet.
    pub user_id: String,
    /// Spendable balance.
    pub balance: u64,
    /// Total loans granted and not yet repaid.
    pub outstanding_loans: u64,
}

/// Ledger operations the engine relies on.
pub trait Wallet {
    /// Returns the user's wallet, creating it when missing.
    ///
    /// The flag is `true` when the wallet was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be reached.
    fn get_or_create_wallet(&self, user_id: &str) -> Result<(WalletAccount, bool), WalletError>;

    /// Credits `amount` to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the credit was not applied.
    fn add_funds(&self, user_id: &str, amount: u64, description: &str) -> Result<(), WalletError>;

    /// Debits `amount` from the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the debit was not applied, including when the
    /// balance is short.
    fn remove_funds(&self, user_id: &str, amount: u64, description: &str)
    -> Result<(), WalletError>;

    /// Makes sure the user can cover `required`, granting a loan of
    /// `loan_amount` when the balance is short.
    ///
    /// The flag is `true` when a loan was granted.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance is still short after the loan or the
    /// ledger cannot be reached.
    fn ensure_funds_with_loan(
        &self,
        user_id: &str,
        required: u64,
        loan_amount: u64,
    ) -> Result<(WalletAccount, bool), WalletError>;

    /// Returns the size of one standard loan.
    fn standard_loan_increment(&self) -> u64;
}

impl<W: Wallet + ?Sized> Wallet for &W {
    fn get_or_create_wallet(&self, user_id: &str) -> Result<(WalletAccount, bool), WalletError> {
        (**self).get_or_create_wallet(user_id)
    }

    fn add_funds(&self, user_id: &str, amount: u64, description: &str) -> Result<(), WalletError> {
        (**self).add_funds(user_id, amount, description)
    }

    fn remove_funds(
        &self,
        user_id: &str,
        amount: u64,
        description: &str,
    ) -> Result<(), WalletError> {
        (**self).remove_funds(user_id, amount, description)
    }

    fn ensure_funds_with_loan(
        &self,
        user_id: &str,
        required: u64,
        loan_amount: u64,
    ) -> Result<(WalletAccount, bool), WalletError> {
        (**self).ensure_funds_with_loan(user_id, required, loan_amount)
    }

    fn standard_loan_increment(&self) -> u64 {
        (**self).standard_loan_increment()
    }
}
