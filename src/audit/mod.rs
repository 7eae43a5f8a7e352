//! Audit logging for expense mutations
//!
//! Every insert and delete is appended to `audit.log` as one JSON line
//! holding a snapshot of the affected expense.
//!
//! # Example
//!
//! ```rust,ignore
//! use expenses::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(partition, &expense))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
