use std::fmt;

use rusqlite::types::Value;
use rusqlite::Connection;

use crate::{Error, Result};

/// Rows returned by a single statement, with the column names SQLite reported.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub statement: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Runs a read-only statement and collects every row.
/// Statements that could modify the database are rejected before they are executed.
pub fn run_query(conn: &Connection, statement: &str) -> Result<QueryResult> {
    let mut stmt = conn.prepare(statement)?;
    if !stmt.readonly() {
        return Err(Error::MutatingQuery(statement.to_string()));
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let column_count = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let values = (0..column_count)
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.push(values);
    }

    Ok(QueryResult {
        statement: statement.to_string(),
        columns,
        rows,
    })
}

impl fmt::Display for QueryResult {
    /// Prints the statement followed by one tuple per row, e.g. `('Bank A', 100.0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\nQuery Statement: {}", self.statement)?;
        for row in &self.rows {
            f.write_str("\n(")?;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, value)?;
            }
            if row.len() == 1 {
                f.write_str(",")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("None"),
        Value::Integer(n) => write!(f, "{n}"),
        Value::Real(x) => write!(f, "{x:?}"),
        // Same quoting as a Python string repr.
        Value::Text(s) if s.contains('\'') && !s.contains('"') => write!(f, "\"{s}\""),
        Value::Text(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
}
