//! Rendered SQL with positional bind values.

use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Binary, Double, Text};
use diesel::sqlite::Sqlite;
use tracing::debug;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Identifier or packed address bytes
    Blob(Vec<u8>),
    /// Any integer column
    Int(i64),
    /// Text column
    Text(String),
    /// Floating point column
    Real(f64),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

/// SQL text with its bind values in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    /// Statement text with `?` placeholders
    pub sql: String,
    /// Values for the placeholders, in order
    pub binds: Vec<SqlValue>,
}

impl SqlFragment {
    /// A fragment with no binds.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    /// Append literal SQL.
    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a placeholder bound to `value`.
    pub fn push_bind(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.sql.push('?');
        self.binds.push(value.into());
        self
    }

    /// Append another fragment, keeping bind order.
    pub fn append(&mut self, other: SqlFragment) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.binds.extend(other.binds);
        self
    }

    /// Append `LIMIT`/`OFFSET` for a page, if it is bounded.
    pub fn push_page(&mut self, page: curator_interface::Page) -> &mut Self {
        if let Some(limit) = page.limit() {
            self.push_sql(" LIMIT ")
                .push_bind(clamp(limit))
                .push_sql(" OFFSET ")
                .push_bind(clamp(page.offset()));
        }
        self
    }

    /// Build a boxed Diesel query with every value bound.
    pub fn into_query(self) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
        debug!(sql = %self.sql, binds = self.binds.len(), "Rendered statement");
        let mut query = diesel::sql_query(self.sql).into_boxed::<Sqlite>();
        for value in self.binds {
            query = match value {
                SqlValue::Blob(bytes) => query.bind::<Binary, _>(bytes),
                SqlValue::Int(int) => query.bind::<BigInt, _>(int),
                SqlValue::Text(text) => query.bind::<Text, _>(text),
                SqlValue::Real(real) => query.bind::<Double, _>(real),
            };
        }
        query
    }
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_interface::Page;

    #[test]
    fn unbounded_pages_add_nothing() {
        let mut fragment = SqlFragment::raw("SELECT 1");
        fragment.push_page(Page::all());
        assert_eq!(fragment.sql, "SELECT 1");
        assert!(fragment.binds.is_empty());
    }

    #[test]
    fn bounded_pages_bind_limit_then_offset() {
        let mut fragment = SqlFragment::raw("SELECT 1");
        fragment.push_page(Page::new(2, 10));
        assert_eq!(fragment.sql, "SELECT 1 LIMIT ? OFFSET ?");
        assert_eq!(fragment.binds, vec![SqlValue::Int(10), SqlValue::Int(20)]);
    }
}
