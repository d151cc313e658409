use crate::core::record::unqualified;
use crate::core::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(ClauseSet),
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
        if_not_exists: bool,
    },
    Insert {
        table: String,
        columns: Option<Vec<String>>,
        values: Vec<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    /// Declared type text, modifiers included (`VARCHAR(50)`). Only used to
    /// pick the placeholder value of the seed record.
    pub type_name: String,
}

/// The pieces of one SELECT statement, before execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseSet {
    pub select_list: Vec<SelectItem>,
    pub from: TableRef,
    pub join: Option<JoinClause>,
    /// Raw WHERE text; interpreted by the condition evaluator.
    pub where_condition: Option<String>,
    pub group_by: Option<Vec<String>>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl ClauseSet {
    #[must_use]
    pub fn has_aggregates(&self) -> bool {
        self.select_list
            .iter()
            .any(|item| matches!(item.expr, SelectExpr::Aggregate(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    /// Prefix used for qualified column names: the alias, else the table name.
    #[must_use]
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: TableRef,
    pub on_left: String,
    pub on_right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectExpr {
    Wildcard,
    Column(String),
    Aggregate(AggregateCall),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub expr: SelectExpr,
    pub alias: Option<String>,
}

impl SelectItem {
    /// Header for this item in the result. Not meaningful for `*`, which
    /// expands to the working schema.
    #[must_use]
    pub fn output_name(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        match &self.expr {
            SelectExpr::Wildcard => "*".to_string(),
            SelectExpr::Column(name) => unqualified(name).to_string(),
            SelectExpr::Aggregate(call) => call.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateTarget {
    All,            // COUNT(*)
    Column(String), // FUNC(column)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateCall {
    pub function: AggregateFunction,
    pub target: AggregateTarget,
}

impl AggregateCall {
    /// Canonical text, e.g. `COUNT(*)` or `SUM(weight)`. Grouped records
    /// store aggregate values under this name.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.target {
            AggregateTarget::All => format!("{}(*)", self.function.as_str()),
            AggregateTarget::Column(col) => format!("{}({})", self.function.as_str(), col),
        }
    }
}

/// A single atomic WHERE condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    IsNull(String),
    IsNotNull(String),
    Equals(String, Value),
    NotEquals(String, Value),
    GreaterThan(String, f64),
    LessThan(String, f64),
    GreaterThanOrEqual(String, f64),
    LessThanOrEqual(String, f64),
    Like(String, String),
}

impl Condition {
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::IsNull(col)
            | Self::IsNotNull(col)
            | Self::Equals(col, _)
            | Self::NotEquals(col, _)
            | Self::GreaterThan(col, _)
            | Self::LessThan(col, _)
            | Self::GreaterThanOrEqual(col, _)
            | Self::LessThanOrEqual(col, _)
            | Self::Like(col, _) => col,
        }
    }
}
