//! Business logic: registry, audit log, transaction engine

pub mod audit;
pub mod engine;
pub mod registry;

pub use audit::AuditLog;
pub use engine::{validate_amount, TransactionEngine};
pub use registry::CustomerRegistry;
