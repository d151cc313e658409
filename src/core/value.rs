use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A scalar cell. Serialized untagged so results travel as plain JSON scalars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the value. Text counts when it parses as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Null => None,
        }
    }

    /// Numeric view with everything non-numeric collapsed to zero.
    #[must_use]
    pub fn coerce_number(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Equality used by `=` predicates and join conditions.
    ///
    /// Null equals nothing, numbers compare numerically when both sides have
    /// a numeric view, anything else compares by display text.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ if self.is_numeric() || other.is_numeric() => {
                match (self.as_number(), other.as_number()) {
                    (Some(a), Some(b)) => a == b,
                    _ => self.to_string() == other.to_string(),
                }
            }
            _ => self.to_string() == other.to_string(),
        }
    }

    /// Sort order for ORDER BY: nulls first, then numbers compared
    /// numerically, then everything else by display text.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| match (self, other) {
                (a, b) if a.is_numeric() && b.is_numeric() => {
                    a.coerce_number().total_cmp(&b.coerce_number())
                }
                (Self::Null, Self::Null) => Ordering::Equal,
                (a, b) => a.to_string().cmp(&b.to_string()),
            })
    }

    const fn sort_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Integer(_) | Self::Float(_) => 1,
            Self::Boolean(_) | Self::Text(_) => 2,
        }
    }

    /// Key fragment used to partition GROUP BY rows. Tagged so that the
    /// integer 1 and the text '1' land in different groups, while the
    /// integer 1 and the float 1.0 share one.
    #[must_use]
    pub fn group_key(&self) -> String {
        match self {
            Self::Null => "z:".to_string(),
            Self::Boolean(b) => format!("b:{b}"),
            Self::Integer(i) => format!("n:{i}"),
            Self::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
                format!("n:{}", *f as i64)
            }
            Self::Float(f) => format!("n:{f}"),
            Self::Text(s) => format!("t:{s}"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
