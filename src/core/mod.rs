// Module declarations
pub mod error;
pub mod value;
pub mod record;
pub mod table;
pub mod catalog;
pub mod history;
pub mod seed;

// Re-exports for convenience
pub use error::ExecutionError;
pub use value::Value;
pub use record::Record;
pub use table::Table;
pub use catalog::{Catalog, TableSummary};
pub use history::History;
pub use seed::starter_catalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Text("hello".to_string()).to_string(), "hello");
        assert_eq!(Value::Boolean(true).to_string(), "true");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(42).as_int(), Some(42));
        assert_eq!(Value::Text("hello".to_string()).as_int(), None);
        assert_eq!(Value::Text("hello".to_string()).as_text(), Some("hello"));
        assert_eq!(Value::Boolean(false).as_bool(), Some(false));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_value_numeric_view() {
        assert_eq!(Value::Text("12".to_string()).as_number(), Some(12.0));
        assert_eq!(Value::Text("dog".to_string()).as_number(), None);
        assert_eq!(Value::Null.coerce_number(), 0.0);
        assert_eq!(Value::Boolean(true).coerce_number(), 1.0);
    }

    #[test]
    fn test_value_loose_eq() {
        assert!(Value::Integer(3).loose_eq(&Value::Float(3.0)));
        assert!(Value::Text("3".to_string()).loose_eq(&Value::Integer(3)));
        assert!(!Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Text("Dog".to_string()).loose_eq(&Value::Text("dog".to_string())));
    }

    #[test]
    fn test_value_natural_cmp() {
        use std::cmp::Ordering;
        assert_eq!(Value::Integer(10).natural_cmp(&Value::Float(9.5)), Ordering::Greater);
        assert_eq!(Value::Null.natural_cmp(&Value::Integer(0)), Ordering::Less);
        assert_eq!(
            Value::Text("10".to_string()).natural_cmp(&Value::Text("9".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn test_natural_cmp_is_transitive_across_kinds() {
        use std::cmp::Ordering;
        let nine = Value::Integer(9);
        let ten = Value::Integer(10);
        let text = Value::Text("5a".to_string());
        assert_eq!(nine.natural_cmp(&ten), Ordering::Less);
        assert_eq!(ten.natural_cmp(&text), Ordering::Less);
        assert_eq!(nine.natural_cmp(&text), Ordering::Less);
        assert_eq!(text.natural_cmp(&nine), Ordering::Greater);

        let mut values = vec![
            Value::Text("5a".to_string()),
            Value::Float(f64::NAN),
            Value::Integer(10),
            Value::Null,
            Value::Boolean(true),
            Value::Float(9.5),
        ];
        values.sort_by(Value::natural_cmp);
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Float(9.5));
        assert_eq!(values[2], Value::Integer(10));
        assert!(matches!(values[3], Value::Float(f) if f.is_nan()));
        assert_eq!(values[4], Value::Text("5a".to_string()));
        assert_eq!(values[5], Value::Boolean(true));
    }

    #[test]
    fn test_group_key_merges_equal_numbers() {
        assert_eq!(Value::Integer(0).group_key(), Value::Float(0.0).group_key());
        assert_eq!(Value::Integer(0).group_key(), Value::Float(-0.0).group_key());
        assert_eq!(Value::Integer(-3).group_key(), Value::Float(-3.0).group_key());
        assert_ne!(Value::Integer(1).group_key(), Value::Float(1.5).group_key());
        assert_ne!(Value::Integer(1).group_key(), Value::Text("1".to_string()).group_key());
        assert_ne!(Value::Null.group_key(), Value::Text(String::new()).group_key());
    }

    #[test]
    fn test_value_serializes_as_scalar() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Integer(1),
            Value::Float(2.5),
            Value::Text("x".to_string()),
            Value::Boolean(true),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,1,2.5,"x",true]"#);
    }
}
