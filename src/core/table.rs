use super::record::Record;

/// A named, ordered sequence of records. The schema is implicit: the keys of
/// the first record.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub records: Vec<Record>,
    /// Created by CREATE TABLE during the session (as opposed to seeded).
    pub temporary: bool,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<Record>, temporary: bool) -> Self {
        Self {
            name: name.into(),
            records,
            temporary,
        }
    }

    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.records.first().map(Record::columns).unwrap_or_default()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}
