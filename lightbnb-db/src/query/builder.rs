//! Structured SELECT builder with positional placeholders
//!
//! Clauses are collected as ordered [`Fragment`]s whose templates mark each
//! bind slot with `{}`. Rendering walks the fragments in insertion order and
//! numbers the slots `$1..$n` while appending the values, so placeholder `$k`
//! always refers to the k-th entry of [`BuiltQuery::params`].

use std::fmt;

use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::QueryAs;
use sqlx::FromRow;

/// Slot marker inside a fragment template
const SLOT: &str = "{}";

/// A bind parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Int(v) => write!(f, "{}", v),
            Self::BigInt(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// A clause template paired with the values for its slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    template: String,
    params: Vec<SqlValue>,
}

impl Fragment {
    /// Create a fragment.
    ///
    /// # Panics
    ///
    /// Panics unless `template` contains exactly one `{}` per value.
    pub fn new(template: impl Into<String>, params: Vec<SqlValue>) -> Self {
        let template = template.into();
        assert_eq!(
            template.matches(SLOT).count(),
            params.len(),
            "slot count mismatch in {:?}",
            template
        );
        Self { template, params }
    }

    /// Fragment with a single bound value.
    pub fn bind(template: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(template, vec![value.into()])
    }

    fn render_into(&self, sql: &mut String, params: &mut Vec<SqlValue>) {
        let mut values = self.params.iter();
        let mut pieces = self.template.split(SLOT).peekable();

        while let Some(piece) = pieces.next() {
            sql.push_str(piece);
            if pieces.peek().is_some() {
                if let Some(value) = values.next() {
                    params.push(value.clone());
                    sql.push('$');
                    sql.push_str(&params.len().to_string());
                }
            }
        }
    }
}

/// Keyword a condition was added with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Where,
    And,
}

impl Keyword {
    fn as_str(self) -> &'static str {
        match self {
            Self::Where => "WHERE",
            Self::And => "AND",
        }
    }
}

/// How condition keywords are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClauseJoining {
    /// First condition opens with `WHERE`, the rest with `AND`.
    #[default]
    Normalized,
    /// Each condition keeps the keyword it was added with. A leading `AND`
    /// without a preceding `WHERE` renders as-is and is not valid SQL.
    Verbatim,
}

/// Rendered SQL text and its ordered bind parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl BuiltQuery {
    /// Prepare a typed query with every parameter bound in order.
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        self.params
            .iter()
            .fold(sqlx::query_as::<_, O>(&self.sql), |query, value| match value {
                SqlValue::Text(s) => query.bind(s.as_str()),
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::BigInt(v) => query.bind(*v),
                SqlValue::Decimal(v) => query.bind(*v),
            })
    }

    /// Parameters rendered for diagnostics, e.g. `['%tahoe%', 10]`.
    pub fn params_display(&self) -> String {
        let items: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("[{}]", items.join(", "))
    }
}

/// Builder for a single SELECT statement
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    head: String,
    conditions: Vec<(Keyword, Fragment)>,
    group_by: Option<String>,
    having: Option<Fragment>,
    order_by: Option<String>,
    limit: Option<SqlValue>,
    joining: ClauseJoining,
}

impl SelectBuilder {
    /// Start from the `SELECT ... FROM ... JOIN ...` head.
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            conditions: Vec::new(),
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
            joining: ClauseJoining::default(),
        }
    }

    pub fn joining(&mut self, joining: ClauseJoining) -> &mut Self {
        self.joining = joining;
        self
    }

    /// Add a condition written with `WHERE`.
    pub fn filter_where(&mut self, condition: Fragment) -> &mut Self {
        self.conditions.push((Keyword::Where, condition));
        self
    }

    /// Add a condition written with `AND`.
    pub fn and_where(&mut self, condition: Fragment) -> &mut Self {
        self.conditions.push((Keyword::And, condition));
        self
    }

    pub fn group_by(&mut self, columns: impl Into<String>) -> &mut Self {
        self.group_by = Some(columns.into());
        self
    }

    pub fn having(&mut self, condition: Fragment) -> &mut Self {
        self.having = Some(condition);
        self
    }

    pub fn order_by(&mut self, columns: impl Into<String>) -> &mut Self {
        self.order_by = Some(columns.into());
        self
    }

    pub fn limit(&mut self, limit: impl Into<SqlValue>) -> &mut Self {
        self.limit = Some(limit.into());
        self
    }

    /// Render the statement. Clause order is fixed; slot numbering follows it.
    pub fn build(&self) -> BuiltQuery {
        let mut sql = self.head.clone();
        let mut params = Vec::new();

        for (index, (keyword, condition)) in self.conditions.iter().enumerate() {
            let keyword = match self.joining {
                ClauseJoining::Normalized if index == 0 => Keyword::Where,
                ClauseJoining::Normalized => Keyword::And,
                ClauseJoining::Verbatim => *keyword,
            };
            sql.push('\n');
            sql.push_str(keyword.as_str());
            sql.push(' ');
            condition.render_into(&mut sql, &mut params);
        }

        if let Some(columns) = &self.group_by {
            sql.push_str("\nGROUP BY ");
            sql.push_str(columns);
        }

        if let Some(condition) = &self.having {
            sql.push_str("\nHAVING ");
            condition.render_into(&mut sql, &mut params);
        }

        if let Some(columns) = &self.order_by {
            sql.push_str("\nORDER BY ");
            sql.push_str(columns);
        }

        if let Some(limit) = &self.limit {
            sql.push('\n');
            Fragment::new("LIMIT {}", vec![limit.clone()]).render_into(&mut sql, &mut params);
        }

        BuiltQuery { sql, params }
    }
}
