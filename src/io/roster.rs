//! Customer roster CSV
//!
//! The roster is the durable snapshot of the bank: one row per customer,
//! with identity fields and the three accounts' numbers and balances.
//! Reading a roster reconstructs the registry (and seeds its allocator
//! state); writing one emits each account's current balance in the
//! starting-balance column, so the written file reloads as the new
//! baseline.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::registry::CustomerRegistry;
use crate::types::account::{Account, AccountKind};
use crate::types::customer::{Customer, CustomerId, Person};
use crate::types::error::LedgerError;

/// One roster row as it appears on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(rename = "Identification Number")]
    pub id: CustomerId,

    #[serde(rename = "First Name")]
    pub first_name: String,

    #[serde(rename = "Last Name")]
    pub last_name: String,

    #[serde(rename = "Date of Birth")]
    pub date_of_birth: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Phone Number")]
    pub phone_number: String,

    #[serde(rename = "Checking Account Number")]
    pub checking_number: u32,

    #[serde(rename = "Checking Starting Balance")]
    pub checking_balance: Decimal,

    #[serde(rename = "Savings Account Number")]
    pub savings_number: u32,

    #[serde(rename = "Savings Starting Balance")]
    pub savings_balance: Decimal,

    #[serde(rename = "Credit Account Number")]
    pub credit_number: u32,

    #[serde(rename = "Credit Max")]
    pub credit_max: Decimal,

    #[serde(rename = "Credit Starting Balance")]
    pub credit_balance: Decimal,
}

/// Build a customer from a roster row
pub fn customer_from_record(record: RosterRecord) -> Customer {
    let person = Person {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        date_of_birth: record.date_of_birth,
        address: record.address,
        city: None,
        state: None,
        zip: None,
        phone_number: record.phone_number,
    };
    Customer::new(
        person,
        Account::checking(record.checking_number, record.checking_balance),
        Account::savings(record.savings_number, record.savings_balance),
        Account::credit(record.credit_number, record.credit_balance, record.credit_max),
    )
}

/// Snapshot a customer into a roster row with current balances
pub fn record_from_customer(customer: &Customer) -> RosterRecord {
    let person = customer.person();
    let checking = customer.account(AccountKind::Checking);
    let savings = customer.account(AccountKind::Savings);
    let credit = customer.account(AccountKind::Credit);

    RosterRecord {
        id: person.id,
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        date_of_birth: person.date_of_birth.clone(),
        address: person.address.clone(),
        phone_number: person.phone_number.clone(),
        checking_number: checking.number(),
        checking_balance: checking.balance(),
        savings_number: savings.number(),
        savings_balance: savings.balance(),
        credit_number: credit.number(),
        credit_max: credit.credit_limit().unwrap_or_default(),
        credit_balance: credit.balance(),
    }
}

/// Load a roster file into a fresh registry
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the file cannot be opened,
/// [`LedgerError::Parse`] for malformed rows, and
/// [`LedgerError::DuplicateAccountNumber`] when two rows share an account
/// number.
pub fn read_roster<P: AsRef<Path>>(path: P) -> Result<CustomerRegistry, LedgerError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut registry = CustomerRegistry::new();
    for result in reader.deserialize() {
        let record: RosterRecord = result?;
        registry.insert(customer_from_record(record))?;
    }
    Ok(registry)
}

/// Write the registry as a roster, sorted by customer id
pub fn write_roster(
    registry: &CustomerRegistry,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut records: Vec<RosterRecord> =
        registry.customers().iter().map(record_from_customer).collect();
    records.sort_by_key(|r| r.id);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
