use std::collections::VecDeque;

/// Append-only log of executed statements, capped at `limit` entries.
/// Once full, the oldest statement is evicted.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(256)),
            limit,
        }
    }

    pub fn record(&mut self, statement: &str) {
        let statement = statement.trim();
        if statement.is_empty() || self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(statement.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_capped() {
        let mut history = History::new(2);
        history.record("SELECT 1");
        history.record("  ");
        history.record("SELECT 2");
        history.record("SELECT 3");
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["SELECT 2", "SELECT 3"]);
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut history = History::new(0);
        history.record("SELECT * FROM concepts");
        assert!(history.is_empty());
    }
}
