//! Batch transaction replay CSV
//!
//! A batch file is a CSV with the header `From First Name, From Last Name,
//! From Where, Action, To First Name, To Last Name, To Where, Amount`.
//! Empty fields are absent; which fields each row needs depends on its
//! action (`inquires`, `deposits`, `withdraws`, `transfers`, `pays`).
//!
//! [`BatchReader`] streams rows one at a time, yielding parsed records or
//! line-numbered error strings. [`replay`] drives a whole file through the
//! engine: malformed rows and rejected operations are reported and replay
//! continues with the next row.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;

use crate::core::engine::TransactionEngine;
use crate::types::account::AccountKind;

/// One batch row exactly as it appears on disk, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCsvRecord {
    #[serde(rename = "From First Name")]
    pub from_first_name: Option<String>,

    #[serde(rename = "From Last Name")]
    pub from_last_name: Option<String>,

    #[serde(rename = "From Where")]
    pub from_where: Option<String>,

    #[serde(rename = "Action")]
    pub action: Option<String>,

    #[serde(rename = "To First Name")]
    pub to_first_name: Option<String>,

    #[serde(rename = "To Last Name")]
    pub to_last_name: Option<String>,

    #[serde(rename = "To Where")]
    pub to_where: Option<String>,

    #[serde(rename = "Amount")]
    pub amount: Option<Decimal>,
}

/// A validated batch operation, ready for the engine
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRecord {
    Inquiry {
        name: String,
        kind: AccountKind,
    },
    Deposit {
        name: String,
        kind: AccountKind,
        amount: Decimal,
    },
    Withdrawal {
        name: String,
        kind: AccountKind,
        amount: Decimal,
    },
    Transfer {
        from_name: String,
        from_kind: AccountKind,
        to_name: String,
        to_kind: AccountKind,
        amount: Decimal,
    },
    Payment {
        from_name: String,
        from_kind: AccountKind,
        to_name: String,
        to_kind: AccountKind,
        amount: Decimal,
    },
}

fn full_name(first: Option<String>, last: Option<String>, side: &str) -> Result<String, String> {
    match (non_empty(first), non_empty(last)) {
        (Some(first), Some(last)) => Ok(format!("{} {}", first, last)),
        _ => Err(format!("Missing {} name", side)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_kind(value: Option<String>, side: &str) -> Result<AccountKind, String> {
    let value = non_empty(value).ok_or_else(|| format!("Missing {} account type", side))?;
    value
        .parse::<AccountKind>()
        .map_err(|e| format!("Invalid {} account type: {}", side, e))
}

fn required_amount(amount: Option<Decimal>, action: &str) -> Result<Decimal, String> {
    amount.ok_or_else(|| format!("Missing amount for '{}'", action))
}

/// Validate a raw CSV row into a [`BatchRecord`]
///
/// The action and account-kind strings are parsed here, once, at the
/// boundary; the engine never sees raw strings for these.
pub fn convert_batch_record(record: BatchCsvRecord) -> Result<BatchRecord, String> {
    let action = non_empty(record.action).ok_or("Missing action")?;

    match action.to_lowercase().as_str() {
        "inquires" => Ok(BatchRecord::Inquiry {
            name: full_name(record.from_first_name, record.from_last_name, "payer")?,
            kind: parse_kind(record.from_where, "source")?,
        }),
        "deposits" => Ok(BatchRecord::Deposit {
            name: full_name(record.to_first_name, record.to_last_name, "payee")?,
            kind: parse_kind(record.to_where, "target")?,
            amount: required_amount(record.amount, "deposits")?,
        }),
        "withdraws" => Ok(BatchRecord::Withdrawal {
            name: full_name(record.from_first_name, record.from_last_name, "payer")?,
            kind: parse_kind(record.from_where, "source")?,
            amount: required_amount(record.amount, "withdraws")?,
        }),
        "transfers" => Ok(BatchRecord::Transfer {
            from_name: full_name(record.from_first_name, record.from_last_name, "payer")?,
            from_kind: parse_kind(record.from_where, "source")?,
            to_name: full_name(record.to_first_name, record.to_last_name, "payee")?,
            to_kind: parse_kind(record.to_where, "target")?,
            amount: required_amount(record.amount, "transfers")?,
        }),
        "pays" => Ok(BatchRecord::Payment {
            from_name: full_name(record.from_first_name, record.from_last_name, "payer")?,
            from_kind: parse_kind(record.from_where, "source")?,
            to_name: full_name(record.to_first_name, record.to_last_name, "payee")?,
            to_kind: parse_kind(record.to_where, "target")?,
            amount: required_amount(record.amount, "pays")?,
        }),
        other => Err(format!("Invalid action: '{}'", other)),
    }
}

/// Streaming reader over a batch file
///
/// Yields `Result<BatchRecord, String>` per row; errors carry the file
/// line number. Rows are read one at a time, so memory stays constant
/// regardless of file size.
#[derive(Debug)]
pub struct BatchReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl BatchReader {
    /// Open a batch file for streaming iteration
    ///
    /// Fields are whitespace-trimmed and rows with trailing empty fields
    /// are accepted.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for BatchReader {
    type Item = Result<BatchRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<BatchCsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Line numbers are 1-based and account for the header row.
                Some(
                    convert_batch_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

/// Outcome counts of a batch replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Operations the engine applied
    pub applied: usize,
    /// Operations the engine rejected (balances untouched)
    pub rejected: usize,
    /// Rows that never reached the engine
    pub malformed: usize,
}

/// Replay a batch file through the engine
///
/// Malformed rows are reported to stderr and skipped. Rejected operations
/// are reported to stderr and noted in the audit log as failed
/// transactions; replay continues either way. Only opening the file can
/// fail fatally.
pub fn replay(engine: &mut TransactionEngine, path: &Path) -> Result<ReplaySummary, String> {
    let reader = BatchReader::new(path)?;
    let mut summary = ReplaySummary::default();

    for result in reader {
        match result {
            Ok(record) => match apply(engine, record) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    eprintln!("Transaction error: {}", e);
                    engine.audit_mut().record(&format!("Failed transaction: {}", e));
                    summary.rejected += 1;
                }
            },
            Err(e) => {
                eprintln!("CSV parsing error: {}", e);
                summary.malformed += 1;
            }
        }
    }

    Ok(summary)
}

fn apply(engine: &mut TransactionEngine, record: BatchRecord) -> Result<(), String> {
    let result = match record {
        BatchRecord::Inquiry { name, kind } => {
            engine.inquire_by_name(&name, kind).map(|_| ())
        }
        BatchRecord::Deposit { name, kind, amount } => {
            engine.deposit_by_name(&name, kind, amount).map(|_| ())
        }
        BatchRecord::Withdrawal { name, kind, amount } => {
            engine.withdraw_by_name(&name, kind, amount).map(|_| ())
        }
        BatchRecord::Transfer {
            from_name,
            from_kind,
            to_name,
            to_kind,
            amount,
        } => engine.transfer_by_name(&from_name, from_kind, &to_name, to_kind, amount),
        BatchRecord::Payment {
            from_name,
            from_kind,
            to_name,
            to_kind,
            amount,
        } => engine.pay_by_name(&from_name, from_kind, &to_name, to_kind, amount),
    };
    result.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::AuditLog;
    use crate::core::registry::CustomerRegistry;
    use crate::types::account::Account;
    use crate::types::customer::{Customer, Person};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "From First Name,From Last Name,From Where,Action,To First Name,To Last Name,To Where,Amount\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn person(id: u32, first: &str, last: &str) -> Person {
        Person {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: "1-Jan-90".to_string(),
            address: "1 Main St".to_string(),
            city: None,
            state: None,
            zip: None,
            phone_number: "(555) 555-0100".to_string(),
        }
    }

    fn engine() -> TransactionEngine {
        let mut registry = CustomerRegistry::new();
        registry
            .insert(Customer::new(
                person(1, "Ann", "Smith"),
                Account::checking(1001, dec(1000)),
                Account::savings(1002, dec(2000)),
                Account::credit(1003, dec(0), dec(5000)),
            ))
            .unwrap();
        registry
            .insert(Customer::new(
                person(2, "Bob", "Jones"),
                Account::checking(1004, dec(500)),
                Account::savings(1005, dec(0)),
                Account::credit(1006, dec(0), dec(5000)),
            ))
            .unwrap();
        TransactionEngine::new(registry, AuditLog::new())
    }

    fn balance(engine: &TransactionEngine, id: u32, kind: AccountKind) -> Decimal {
        engine
            .registry()
            .resolve_by_id(id)
            .unwrap()
            .account(kind)
            .balance()
    }

    #[test]
    fn test_reader_parses_each_action() {
        let content = format!(
            "{}{}",
            HEADER,
            "Ann,Smith,Checking,inquires,,,,\n\
             ,,,deposits,Bob,Jones,Savings,50\n\
             Ann,Smith,Checking,withdraws,,,,100\n\
             Ann,Smith,Checking,transfers,Ann,Smith,Savings,100\n\
             Ann,Smith,Checking,pays,Bob,Jones,Checking,25\n"
        );
        let file = create_temp_csv(&content);

        let records: Vec<_> = BatchReader::new(file.path())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(
            records[0],
            BatchRecord::Inquiry {
                name: "Ann Smith".to_string(),
                kind: AccountKind::Checking,
            }
        );
        assert_eq!(
            records[1],
            BatchRecord::Deposit {
                name: "Bob Jones".to_string(),
                kind: AccountKind::Savings,
                amount: dec(50),
            }
        );
        assert!(matches!(records[3], BatchRecord::Transfer { .. }));
        assert!(matches!(records[4], BatchRecord::Payment { .. }));
    }

    #[test]
    fn test_reader_includes_line_numbers_in_errors() {
        let content = format!(
            "{}{}",
            HEADER,
            "Ann,Smith,Checking,withdraws,,,,100\n\
             Ann,Smith,Checking,vanishes,,,,100\n"
        );
        let file = create_temp_csv(&content);

        let results: Vec<_> = BatchReader::new(file.path()).unwrap().collect();
        assert!(results[0].is_ok());
        let error = results[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"));
        assert!(error.contains("Invalid action"));
    }

    #[test]
    fn test_convert_rejects_missing_fields() {
        let record = BatchCsvRecord {
            from_first_name: Some("Ann".to_string()),
            from_last_name: Some("Smith".to_string()),
            from_where: Some("Checking".to_string()),
            action: Some("withdraws".to_string()),
            to_first_name: None,
            to_last_name: None,
            to_where: None,
            amount: None,
        };
        let error = convert_batch_record(record).unwrap_err();
        assert!(error.contains("Missing amount"));
    }

    #[test]
    fn test_convert_rejects_unknown_account_kind() {
        let record = BatchCsvRecord {
            from_first_name: Some("Ann".to_string()),
            from_last_name: Some("Smith".to_string()),
            from_where: Some("Cheque".to_string()),
            action: Some("inquires".to_string()),
            to_first_name: None,
            to_last_name: None,
            to_where: None,
            amount: None,
        };
        let error = convert_batch_record(record).unwrap_err();
        assert!(error.contains("Invalid source account type"));
    }

    #[test]
    fn test_replay_applies_operations_and_counts() {
        let content = format!(
            "{}{}",
            HEADER,
            ",,,deposits,Bob,Jones,Checking,100\n\
             Ann,Smith,Checking,withdraws,,,,200\n\
             Ann,Smith,Checking,transfers,Bob,Jones,Savings,300\n"
        );
        let file = create_temp_csv(&content);

        let mut engine = engine();
        let summary = replay(&mut engine, file.path()).unwrap();

        assert_eq!(summary, ReplaySummary { applied: 3, rejected: 0, malformed: 0 });
        assert_eq!(balance(&engine, 2, AccountKind::Checking), dec(600));
        assert_eq!(balance(&engine, 1, AccountKind::Checking), dec(500));
        assert_eq!(balance(&engine, 2, AccountKind::Savings), dec(300));
    }

    #[test]
    fn test_replay_continues_past_failures() {
        let content = format!(
            "{}{}",
            HEADER,
            "Zed,Nobody,Checking,withdraws,,,,10\n\
             Ann,Smith,Checking,bogus,,,,10\n\
             Ann,Smith,Checking,withdraws,,,,100\n"
        );
        let file = create_temp_csv(&content);

        let mut engine = engine();
        let summary = replay(&mut engine, file.path()).unwrap();

        assert_eq!(summary, ReplaySummary { applied: 1, rejected: 1, malformed: 1 });
        assert_eq!(balance(&engine, 1, AccountKind::Checking), dec(900));

        let entries = engine.audit().entries();
        assert!(entries[0].starts_with("Failed transaction:"));
        assert!(entries[0].contains("Zed Nobody"));
    }

    #[test]
    fn test_replay_fails_on_missing_file() {
        let mut engine = engine();
        let result = replay(&mut engine, Path::new("nonexistent.csv"));
        assert!(result.unwrap_err().contains("Failed to open file"));
    }
}
