//! Core data types for the bank ledger

pub mod account;
pub mod customer;
pub mod error;

pub use account::{Account, AccountKind, AccountNumber};
pub use customer::{Customer, CustomerId, NewCustomer, Person};
pub use error::LedgerError;
