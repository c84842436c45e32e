//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while processing
//! customer operations. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation failures**: non-positive or excessive amounts, unknown
//!   account-kind strings, same-kind transfers, self-payments, unknown
//!   party names. No state is mutated.
//! - **Policy failures**: withdrawal or credit-limit exceeded. No state
//!   is mutated.
//! - **Resource failures**: file I/O and CSV parse errors. In-memory state
//!   stays consistent.

use crate::types::account::{AccountKind, AccountNumber};
use crate::types::customer::CustomerId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Each variant carries the context needed to diagnose the rejected
/// operation. Validation and policy variants always mean "nothing was
/// mutated".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount was zero or negative; rejected before any balance is touched.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Amount exceeds the source account's current balance.
    ///
    /// This front gate applies to every kind, including Credit, ahead of the
    /// per-kind withdrawal policy.
    #[error("Amount exceeds {kind} account balance: balance {balance}, requested {requested}")]
    AmountExceedsBalance {
        /// Kind of the source account
        kind: AccountKind,
        /// Current balance of the source account
        balance: Decimal,
        /// The rejected amount
        requested: Decimal,
    },

    /// Checking/Savings withdrawal policy failure.
    #[error("Insufficient funds: {kind} account balance {balance}, requested {requested}")]
    InsufficientFunds {
        kind: AccountKind,
        balance: Decimal,
        requested: Decimal,
    },

    /// Credit withdrawal or transfer would push the balance below `-limit`.
    #[error("Withdrawal denied, exceeds credit limit: balance {balance}, limit {limit}, requested {requested}")]
    CreditLimitExceeded {
        balance: Decimal,
        limit: Decimal,
        requested: Decimal,
    },

    /// Deposit would push a Credit balance above `+limit`.
    #[error("Cannot deposit {amount}: balance {balance} would exceed the credit limit {limit}")]
    DepositExceedsCreditLimit {
        balance: Decimal,
        limit: Decimal,
        amount: Decimal,
    },

    /// Batch transfers between two accounts of the same kind are rejected.
    #[error("Cannot transfer within the same account type: {kind}")]
    SameKindTransfer { kind: AccountKind },

    /// A customer may not pay themselves.
    #[error("{name} cannot make a payment to themselves")]
    SelfPayment { name: String },

    /// Full-name lookup found no customer.
    #[error("Customer '{name}' does not exist")]
    UnknownCustomer { name: String },

    /// Id lookup found no customer.
    #[error("No customer with id {id}")]
    UnknownCustomerId { id: CustomerId },

    /// Account-kind string was not "Checking", "Savings" or "Credit".
    #[error("Invalid account kind '{value}'")]
    InvalidAccountKind { value: String },

    /// An account number was already allocated to another account.
    #[error("Account number {number} is already allocated")]
    DuplicateAccountNumber { number: AccountNumber },

    /// Arithmetic overflow would occur; the operation is rejected to keep
    /// the account consistent.
    #[error("Arithmetic overflow in {operation} on account {number}")]
    ArithmeticOverflow {
        operation: String,
        number: AccountNumber,
    },

    /// Arithmetic underflow would occur; the operation is rejected to keep
    /// the account consistent.
    #[error("Arithmetic underflow in {operation} on account {number}")]
    ArithmeticUnderflow {
        operation: String,
        number: AccountNumber,
    },

    /// I/O error while reading or writing files.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// CSV parsing error; the malformed record is skipped and processing
    /// continues with the next one.
    #[error("CSV parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for the common rejections

impl LedgerError {
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    pub fn amount_exceeds_balance(kind: AccountKind, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::AmountExceedsBalance {
            kind,
            balance,
            requested,
        }
    }

    pub fn insufficient_funds(kind: AccountKind, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            kind,
            balance,
            requested,
        }
    }

    pub fn credit_limit_exceeded(balance: Decimal, limit: Decimal, requested: Decimal) -> Self {
        LedgerError::CreditLimitExceeded {
            balance,
            limit,
            requested,
        }
    }

    pub fn deposit_exceeds_credit_limit(balance: Decimal, limit: Decimal, amount: Decimal) -> Self {
        LedgerError::DepositExceedsCreditLimit {
            balance,
            limit,
            amount,
        }
    }

    pub fn same_kind_transfer(kind: AccountKind) -> Self {
        LedgerError::SameKindTransfer { kind }
    }

    pub fn self_payment(name: &str) -> Self {
        LedgerError::SelfPayment {
            name: name.to_string(),
        }
    }

    pub fn unknown_customer(name: &str) -> Self {
        LedgerError::UnknownCustomer {
            name: name.to_string(),
        }
    }

    pub fn unknown_customer_id(id: CustomerId) -> Self {
        LedgerError::UnknownCustomerId { id }
    }

    pub fn invalid_account_kind(value: &str) -> Self {
        LedgerError::InvalidAccountKind {
            value: value.trim().to_string(),
        }
    }

    pub fn duplicate_account_number(number: AccountNumber) -> Self {
        LedgerError::DuplicateAccountNumber { number }
    }

    pub fn arithmetic_overflow(operation: &str, number: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            number,
        }
    }

    pub fn arithmetic_underflow(operation: &str, number: AccountNumber) -> Self {
        LedgerError::ArithmeticUnderflow {
            operation: operation.to_string(),
            number,
        }
    }
}
