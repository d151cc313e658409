use super::value::Value;

/// One row: an ordered field-name to value mapping.
///
/// Lookups ignore ASCII case; the stored spelling is whatever was declared.
/// Names containing a `.` (`alias.column`) are lookup aliases added while
/// resolving FROM and JOIN and do not count as schema columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.set(name, value);
        }
        record
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(field, _)| field.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|idx| &self.fields[idx].1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Insert or overwrite a field. An overwritten field keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.fields[idx].1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Schema columns in declaration order (qualified aliases excluded).
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(name, _)| !is_qualified(name))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `alias.column`. Aggregate labels such as `SUM(r.weight)` are not.
#[must_use]
pub fn is_qualified(name: &str) -> bool {
    name.contains('.') && !name.contains('(')
}

/// `c.name` -> `name`; bare names pass through.
#[must_use]
pub fn unqualified(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, column)| column)
}
