//! Account types for the bank ledger
//!
//! This module defines the account kinds, the `Account` entity, and the
//! per-kind withdrawal policy. Checking and Savings accounts may never go
//! negative; Credit accounts may go as far negative as their credit limit.

use crate::types::error::LedgerError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Account number, globally unique across all customers
pub type AccountNumber = u32;

/// The three account kinds a customer holds, in fixed roster order
///
/// The kind determines the withdrawal policy applied by [`Account::withdraw`]
/// and is also how callers (menus, batch files) address one of a customer's
/// three accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
}

impl AccountKind {
    /// All kinds in the fixed per-customer order: Checking, Savings, Credit
    pub const ALL: [AccountKind; 3] = [
        AccountKind::Checking,
        AccountKind::Savings,
        AccountKind::Credit,
    ];
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
            AccountKind::Credit => "Credit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AccountKind {
    type Err = LedgerError;

    /// Parse an external account-kind string ("Checking"/"Savings"/"Credit")
    ///
    /// Parsing is case-insensitive. Anything else fails closed with
    /// [`LedgerError::InvalidAccountKind`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            "credit" => Ok(AccountKind::Credit),
            _ => Err(LedgerError::invalid_account_kind(s)),
        }
    }
}

/// A single bank account owned by one customer
///
/// Balances are signed: for Checking and Savings the balance is never
/// negative after a successful operation; for Credit a negative balance is
/// the amount owed and may go down to `-limit`.
///
/// Balance mutation happens only through [`Account::withdraw`] and
/// [`Account::deposit`]; the fields themselves are private so the withdrawal
/// policy cannot be bypassed.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Globally unique account number
    number: AccountNumber,

    /// Kind of the account, which selects the withdrawal policy
    kind: AccountKind,

    /// Current balance
    balance: Decimal,

    /// Balance snapshot at creation, never updated afterwards
    starting_balance: Decimal,

    /// Credit limit; `Some` exactly for Credit accounts
    credit_limit: Option<Decimal>,
}

impl Account {
    /// Create a checking account
    pub fn checking(number: AccountNumber, starting_balance: Decimal) -> Self {
        Account {
            number,
            kind: AccountKind::Checking,
            balance: starting_balance,
            starting_balance,
            credit_limit: None,
        }
    }

    /// Create a savings account
    pub fn savings(number: AccountNumber, starting_balance: Decimal) -> Self {
        Account {
            number,
            kind: AccountKind::Savings,
            balance: starting_balance,
            starting_balance,
            credit_limit: None,
        }
    }

    /// Create a credit account with the given credit limit
    ///
    /// The limit is the maximum magnitude the balance may go negative.
    pub fn credit(number: AccountNumber, starting_balance: Decimal, limit: Decimal) -> Self {
        Account {
            number,
            kind: AccountKind::Credit,
            balance: starting_balance,
            starting_balance,
            credit_limit: Some(limit),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn starting_balance(&self) -> Decimal {
        self.starting_balance
    }

    /// The credit limit, `Some` only for Credit accounts
    pub fn credit_limit(&self) -> Option<Decimal> {
        self.credit_limit
    }

    /// Remaining credit a Credit account can draw: `limit + balance`
    ///
    /// Returns `None` for Checking and Savings accounts.
    pub fn available_credit(&self) -> Option<Decimal> {
        self.credit_limit.map(|limit| limit + self.balance)
    }

    fn limit(&self) -> Decimal {
        self.credit_limit.unwrap_or_default()
    }

    /// Check whether `amount` can be withdrawn under this account's policy
    ///
    /// * Checking/Savings: `balance >= amount`
    /// * Credit: `balance - amount >= -limit`
    pub fn allowed_to_withdraw(&self, amount: Decimal) -> bool {
        match self.kind {
            AccountKind::Checking | AccountKind::Savings => self.balance >= amount,
            AccountKind::Credit => self.balance - amount >= -self.limit(),
        }
    }

    /// Withdraw `amount` from this account
    ///
    /// This is the only place a balance decreases. If the per-kind policy
    /// rejects the amount, the balance is left unchanged.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::InsufficientFunds`] for Checking/Savings when the
    ///   balance does not cover the amount
    /// * [`LedgerError::CreditLimitExceeded`] for Credit when the withdrawal
    ///   would push the balance below `-limit`
    /// * [`LedgerError::ArithmeticUnderflow`] if the subtraction itself fails
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if !self.allowed_to_withdraw(amount) {
            return Err(match self.kind {
                AccountKind::Credit => {
                    LedgerError::credit_limit_exceeded(self.balance, self.limit(), amount)
                }
                _ => LedgerError::insufficient_funds(self.kind, self.balance, amount),
            });
        }

        let new_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_underflow("withdraw", self.number))?;

        self.balance = new_balance;
        Ok(())
    }

    /// Deposit `amount` into this account
    ///
    /// Deposits increase the balance unconditionally, except that a Credit
    /// account may not be pushed above `+limit`. Callers are responsible for
    /// validating that the amount is positive.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::DepositExceedsCreditLimit`] for Credit when
    ///   `balance + amount > limit`
    /// * [`LedgerError::ArithmeticOverflow`] if the addition itself fails
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", self.number))?;

        if let Some(limit) = self.credit_limit {
            if new_balance > limit {
                return Err(LedgerError::deposit_exceeds_credit_limit(
                    self.balance,
                    limit,
                    amount,
                ));
            }
        }

        self.balance = new_balance;
        Ok(())
    }
}

impl fmt::Display for Account {
    /// Render the account number, kind and balance; Credit accounts also
    /// render their credit limit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account number: {}\nAccount type: {}\nAccount current balance: {}",
            self.number, self.kind, self.balance
        )?;
        if let Some(limit) = self.credit_limit {
            write!(f, "\nMaximum credit: {}", limit)?;
        }
        Ok(())
    }
}
