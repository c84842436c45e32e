//! Append-only audit log
//!
//! Every successful operation is recorded here: once in the global log and,
//! for customer-initiated operations, mirrored into that customer's own
//! history. Entries are never rewritten or removed.
//!
//! The log can optionally stream to a durable file sink. Sink failures are
//! reported to stderr and never roll back the in-memory entry: the
//! in-memory log is the source of truth for the session.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::types::error::LedgerError;

/// Append-only transaction log with an optional durable file sink
#[derive(Debug, Default)]
pub struct AuditLog {
    /// Every entry in append order
    entries: Vec<String>,

    /// Per-customer mirror, keyed by full name
    by_customer: HashMap<String, Vec<String>>,

    /// Durable sink; entries are appended as lines
    sink: Option<File>,
}

impl AuditLog {
    /// Create an in-memory-only log
    pub fn new() -> Self {
        AuditLog::default()
    }

    /// Create a log that also appends every entry to the file at `path`
    ///
    /// The file is created if missing and appended to if present.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the file cannot be opened.
    pub fn with_sink<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let sink = File::options().create(true).append(true).open(path)?;
        Ok(AuditLog {
            entries: Vec::new(),
            by_customer: HashMap::new(),
            sink: Some(sink),
        })
    }

    /// Append an entry to the global log
    ///
    /// Empty messages are ignored with a stderr diagnostic. A sink write
    /// failure is reported to stderr; the in-memory entry stands.
    pub fn record(&mut self, message: &str) {
        if message.is_empty() {
            eprintln!("Ignoring empty log entry");
            return;
        }

        self.entries.push(message.to_string());

        if let Some(sink) = &mut self.sink {
            if let Err(e) = writeln!(sink, "{}", message) {
                eprintln!("Failed to write to log file: {}", e);
            }
        }
    }

    /// Append an entry to the global log and mirror it into the named
    /// customer's history
    pub fn record_for_customer(&mut self, full_name: &str, message: &str) {
        if message.is_empty() {
            eprintln!("Ignoring empty log entry");
            return;
        }

        self.by_customer
            .entry(full_name.to_string())
            .or_default()
            .push(message.to_string());

        self.record(message);
    }

    /// Every entry recorded so far, in append order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The named customer's history; empty if they have none
    pub fn entries_for(&self, full_name: &str) -> &[String] {
        self.by_customer
            .get(full_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
