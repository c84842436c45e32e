//! External formats: roster CSV, batch replay CSV, statement reports

pub mod batch;
pub mod roster;
pub mod statement;

pub use batch::{replay, BatchReader, BatchRecord, ReplaySummary};
pub use roster::{read_roster, write_roster};
pub use statement::{write_all_statements, write_statement};
