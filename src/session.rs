use std::collections::BTreeMap;

use crate::config::SessionConfig;
use crate::core::{starter_catalog, Catalog, History, TableSummary};
use crate::executor::{ExecutionOutcome, QueryExecutor};
use log::debug;

/// One learner's executor state: a catalog and the statements run so far.
///
/// Sessions share nothing, so each test or tab can own its own.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    history: History,
}

impl Session {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let catalog = if config.seed {
            starter_catalog()
        } else {
            Catalog::new()
        };
        Self::with_catalog(catalog, config.history_limit)
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog, history_limit: usize) -> Self {
        Self {
            catalog,
            history: History::new(history_limit),
        }
    }

    /// Run one statement. Every non-blank statement is recorded in the
    /// history, whether it succeeds or not.
    pub fn execute(&mut self, sql: &str) -> ExecutionOutcome {
        self.history.record(sql);
        let outcome = ExecutionOutcome::from(QueryExecutor::execute_sql(&mut self.catalog, sql));
        if let ExecutionOutcome::Failure { error } = &outcome {
            debug!("statement failed: {error}");
        }
        outcome
    }

    /// Snapshot of every table's columns and row count.
    #[must_use]
    pub fn describe(&self) -> BTreeMap<String, TableSummary> {
        self.catalog.list_tables()
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseeded_session_is_empty() {
        let session = Session::new(&SessionConfig {
            history_limit: 10,
            seed: false,
        });
        assert!(session.describe().is_empty());
    }

    #[test]
    fn test_history_records_attempts() {
        let mut session = Session::with_catalog(starter_catalog(), 2);
        session.execute("SELECT * FROM concepts");
        session.execute("   ");
        session.execute("DELETE FROM concepts");
        session.execute("SELECT name FROM concepts;");

        let entries: Vec<&str> = session.history().iter().collect();
        assert_eq!(entries, vec!["DELETE FROM concepts", "SELECT name FROM concepts;"]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::default();
        let second = Session::default();
        assert!(first.execute("INSERT INTO concepts (id, name) VALUES (4, 'Cat')").is_success());
        assert_eq!(first.describe()["concepts"].row_count, 4);
        assert_eq!(second.describe()["concepts"].row_count, 3);
    }
}
