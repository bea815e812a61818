//! SQL text generation shared by the relational backends
//!
//! Table and column names cannot be bound as parameters, so they are
//! validated as plain identifiers and double-quoted. Values are always bound,
//! except nulls, which are written as a literal `NULL` so that no backend
//! has to infer a parameter type for them.

use crate::domain::{is_valid_identifier, ColumnKind, FlatRow, IngestError, Result, ID_COLUMN};

/// SQL dialect of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Sqlite => format!("?{index}"),
        }
    }

    fn column_type(&self, kind: ColumnKind) -> &'static str {
        match (self, kind) {
            (_, ColumnKind::Text) => "TEXT",
            (Dialect::Postgres, ColumnKind::Integer) => "BIGINT",
            (Dialect::Postgres, ColumnKind::Real) => "DOUBLE PRECISION",
            (Dialect::Postgres, ColumnKind::Boolean) => "BOOLEAN",
            (Dialect::Sqlite, ColumnKind::Integer) => "INTEGER",
            (Dialect::Sqlite, ColumnKind::Real) => "REAL",
            (Dialect::Sqlite, ColumnKind::Boolean) => "BOOLEAN",
        }
    }
}

/// Validates and double-quotes a table or column name
pub fn quote_identifier(name: &str) -> Result<String> {
    if !is_valid_identifier(name) {
        return Err(IngestError::Database(format!("invalid identifier '{name}'")));
    }
    Ok(format!("\"{name}\""))
}

/// `CREATE TABLE IF NOT EXISTS` with one column per row key; `id` is the key
pub fn create_table(dialect: Dialect, table: &str, row: &FlatRow) -> Result<String> {
    row.validate()?;
    let columns = row
        .iter()
        .map(|(name, value)| {
            let quoted = quote_identifier(name)?;
            Ok(if name == ID_COLUMN {
                format!("{quoted} TEXT PRIMARY KEY")
            } else {
                format!("{quoted} {}", dialect.column_type(value.kind()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table)?,
        columns.join(", ")
    ))
}

/// `INSERT` for every column of the row
///
/// Returns the statement and the positions (in row order) of the columns
/// that were given a placeholder; null columns are inlined.
pub fn insert(dialect: Dialect, table: &str, row: &FlatRow) -> Result<(String, Vec<usize>)> {
    row.validate()?;
    let mut names = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    let mut bound = Vec::new();

    for (position, (name, value)) in row.iter().enumerate() {
        names.push(quote_identifier(name)?);
        if value.is_null() {
            values.push("NULL".to_string());
        } else {
            bound.push(position);
            values.push(dialect.placeholder(bound.len()));
        }
    }

    let statement = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table)?,
        names.join(", "),
        values.join(", ")
    );
    Ok((statement, bound))
}

pub fn exists(dialect: Dialect, table: &str) -> Result<String> {
    Ok(format!(
        "SELECT 1 FROM {} WHERE {} = {} LIMIT 1",
        quote_identifier(table)?,
        quote_identifier(ID_COLUMN)?,
        dialect.placeholder(1)
    ))
}

pub fn count(table: &str) -> Result<String> {
    Ok(format!("SELECT COUNT(*) FROM {}", quote_identifier(table)?))
}
