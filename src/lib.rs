//! Bank Ledger Library
//! # Overview
//!
//! This library implements a small retail-banking ledger: a customer
//! registry where every customer holds a Checking, a Savings and a Credit
//! account, a transaction engine with five operations, and an append-only
//! audit log.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Customer, LedgerError)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - Customer storage, lookup indexes, number allocation
//!   - [`core::engine`] - The five ledger operations
//!   - [`core::audit`] - Append-only global and per-customer logs
//! - [`io`] - External formats: roster CSV, batch replay CSV, statements
//!
//! # Operations
//!
//! The engine supports five operations:
//!
//! - **Inquire**: Render a customer's balances (read-only, still logged)
//! - **Deposit**: Credit funds to an account (Credit accounts are capped
//!   at their limit)
//! - **Withdraw**: Debit funds (Checking/Savings never go negative; Credit
//!   may go down to `-limit`)
//! - **Transfer**: Move funds between two of a customer's own accounts
//! - **Pay**: Move funds to another customer, resolved by full name
//!
//! Rejected operations mutate nothing and are never logged as successes.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{validate_amount, AuditLog, CustomerRegistry, TransactionEngine};
pub use io::{read_roster, replay, write_all_statements, write_roster, ReplaySummary};
pub use types::{
    Account, AccountKind, AccountNumber, Customer, CustomerId, LedgerError, NewCustomer, Person,
};
