use super::catalog::Catalog;
use super::record::Record;
use super::value::Value;

fn concept(id: i64, name: &str, parent_id: Option<i64>, is_abstract: bool) -> Record {
    Record::from_pairs([
        ("id", Value::Integer(id)),
        ("name", Value::from(name)),
        ("parent_id", Value::from(parent_id)),
        ("is_abstract", Value::Boolean(is_abstract)),
    ])
}

fn property(id: i64, concept_id: i64, name: &str, datatype: &str, required: bool) -> Record {
    Record::from_pairs([
        ("id", Value::Integer(id)),
        ("concept_id", Value::Integer(concept_id)),
        ("name", Value::from(name)),
        ("datatype", Value::from(datatype)),
        ("required", Value::Boolean(required)),
    ])
}

fn relation(id: i64, source_id: i64, target_id: i64, kind: &str, weight: f64) -> Record {
    Record::from_pairs([
        ("id", Value::Integer(id)),
        ("source_id", Value::Integer(source_id)),
        ("target_id", Value::Integer(target_id)),
        ("kind", Value::from(kind)),
        ("weight", Value::Float(weight)),
    ])
}

/// The starter catalog the tutorial statements are written against:
/// a three-level concept chain (Entity -> Animal -> Dog) plus property and
/// relation tables that reference it.
#[must_use]
pub fn starter_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.register_permanent(
        "concepts",
        vec![
            concept(1, "Entity", None, true),
            concept(2, "Animal", Some(1), true),
            concept(3, "Dog", Some(2), false),
        ],
    );

    catalog.register_permanent(
        "properties",
        vec![
            property(1, 1, "identifier", "text", true),
            property(2, 2, "legs", "integer", true),
            property(3, 2, "habitat", "text", false),
            property(4, 3, "breed", "text", false),
            property(5, 3, "weight_kg", "float", false),
        ],
    );

    catalog.register_permanent(
        "relations",
        vec![
            relation(1, 2, 1, "is_a", 1.0),
            relation(2, 3, 2, "is_a", 1.0),
            relation(3, 3, 1, "instance_of", 0.5),
            relation(4, 3, 2, "resembles", 0.25),
        ],
    );

    catalog
}
