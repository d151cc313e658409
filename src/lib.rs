// TutorSQL - teaching-grade in-memory SQL executor
// One statement at a time against a small catalog of seed and session tables

// Clippy configuration - allow non-critical warnings
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

// Data model (values, records, tables, catalog, history, seed data)
pub mod core;

// SQL parser (statement router, clause matcher, DDL/DML sub-parsers)
pub mod parser;

// Query executor (WHERE, aggregates, SELECT pipeline, CREATE TABLE, INSERT)
pub mod executor;

// Session state and configuration
pub mod session;
pub mod config;

// Re-export commonly used types for convenience
pub use crate::core::{Catalog, ExecutionError, Record, Table, TableSummary, Value, starter_catalog};
pub use crate::parser::{Statement, parse_statement};
pub use crate::executor::{ExecutionOutcome, QueryExecutor, QueryResult};
pub use crate::session::Session;
pub use crate::config::SessionConfig;
