//! Per-customer bank statements
//!
//! A statement is a plain-text report for one customer: a dated header,
//! the final balance of each account, and the customer's own transaction
//! history from the audit log.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::core::engine::TransactionEngine;
use crate::types::customer::Customer;
use crate::types::error::LedgerError;

/// Write one customer's statement to `output`
pub fn write_statement(
    customer: &Customer,
    entries: &[String],
    date: NaiveDate,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    writeln!(output, "Bank statement for {}", customer.full_name())?;
    writeln!(output, "Date: {}", date.format("%Y-%m-%d"))?;
    writeln!(output)?;

    for account in customer.accounts() {
        writeln!(
            output,
            "Account {} ({}): ${}",
            account.kind(),
            account.number(),
            account.balance()
        )?;
    }
    writeln!(output)?;

    writeln!(output, "Transactions:")?;
    if entries.is_empty() {
        writeln!(output, "No transactions found.")?;
    } else {
        for entry in entries {
            writeln!(output, "{}", entry)?;
        }
    }
    Ok(())
}

/// Write a dated statement file for every customer into `dir`
///
/// Files are named `<First>_<Last>_statement.txt`. Existing files are
/// overwritten.
pub fn write_all_statements(engine: &TransactionEngine, dir: &Path) -> Result<(), LedgerError> {
    std::fs::create_dir_all(dir)?;
    let today = Local::now().date_naive();

    for customer in engine.registry().customers() {
        let file_name = format!(
            "{}_{}_statement.txt",
            customer.person().first_name,
            customer.person().last_name
        );
        let mut file = File::create(dir.join(file_name))?;
        let entries = engine.audit().entries_for(&customer.full_name());
        write_statement(customer, entries, today, &mut file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::AuditLog;
    use crate::core::registry::CustomerRegistry;
    use crate::types::account::{Account, AccountKind};
    use crate::types::customer::Person;
    use rust_decimal::Decimal;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn customer() -> Customer {
        let person = Person {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            date_of_birth: "1-Jan-90".to_string(),
            address: "1 Main St".to_string(),
            city: None,
            state: None,
            zip: None,
            phone_number: "(555) 555-0100".to_string(),
        };
        Customer::new(
            person,
            Account::checking(1001, dec(800)),
            Account::savings(1002, dec(2000)),
            Account::credit(1003, dec(3000), dec(5000)),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_statement_with_history() {
        let entries = vec![
            "Withdrawal of $200 from Checking account. New balance: $800".to_string(),
        ];
        let mut output = Vec::new();
        write_statement(&customer(), &entries, date(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "Bank statement for Ann Smith\n\
             Date: 2026-08-29\n\
             \n\
             Account Checking (1001): $800\n\
             Account Savings (1002): $2000\n\
             Account Credit (1003): $3000\n\
             \n\
             Transactions:\n\
             Withdrawal of $200 from Checking account. New balance: $800\n"
        );
    }

    #[test]
    fn test_statement_without_history() {
        let mut output = Vec::new();
        write_statement(&customer(), &[], date(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("Transactions:\nNo transactions found.\n"));
    }

    #[test]
    fn test_write_all_statements_creates_one_file_per_customer() {
        let mut registry = CustomerRegistry::new();
        registry.insert(customer()).unwrap();
        let mut engine = TransactionEngine::new(registry, AuditLog::new());
        engine.inquire_balance(1).unwrap();

        let dir = tempfile::tempdir().unwrap();
        write_all_statements(&engine, dir.path()).unwrap();

        let text = std::fs::read_to_string(dir.path().join("Ann_Smith_statement.txt")).unwrap();
        assert!(text.starts_with("Bank statement for Ann Smith\n"));
        assert!(text.contains("Ann Smith made a balance inquiry on their accounts."));
    }

    #[test]
    fn test_statement_lists_accounts_in_kind_order() {
        let mut output = Vec::new();
        write_statement(&customer(), &[], date(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let checking = text.find(AccountKind::Checking.to_string().as_str()).unwrap();
        let credit = text.find("Credit").unwrap();
        assert!(checking < credit);
    }
}
