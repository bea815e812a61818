//! SQLite adapter implementing [`TableStore`]
//!
//! A single connection guarded by a mutex. Statements are short and run
//! synchronously inside the async methods; no guard is held across an await.

use crate::adapters::database::sql::{self, Dialect};
use crate::adapters::database::traits::TableStore;
use crate::domain::{ColumnValue, FlatRow, IngestError, Result};
use async_trait::async_trait;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const MEMORY_PATH: &str = ":memory:";

/// SQLite implementation of the table store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`
    ///
    /// `:memory:` opens a private in-memory database. Missing parent
    /// directories are created.
    pub fn open(path: &str) -> Result<Self> {
        if path == MEMORY_PATH {
            return Self::open_in_memory();
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path, "Opened SQLite database");
        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: MEMORY_PATH.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| IngestError::Database("SQLite connection mutex poisoned".to_string()))?;
        f(&conn)
    }

    /// Reads back the row stored under `id`, if any
    pub fn fetch_row(&self, table: &str, id: &str) -> Result<Option<FlatRow>> {
        let query = format!(
            "SELECT * FROM {} WHERE \"id\" = ?1",
            sql::quote_identifier(table)?
        );
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&query)?;
            let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
            let row = stmt
                .query_row([id], |r| {
                    let mut row = FlatRow::new();
                    for (i, name) in names.iter().enumerate() {
                        row.insert(name.clone(), from_sqlite(r.get_ref(i)?));
                    }
                    Ok(row)
                })
                .optional()?;
            Ok(row)
        })
    }
}

fn to_sqlite(value: &ColumnValue) -> Option<Value> {
    match value {
        ColumnValue::Null => None,
        ColumnValue::Text(s) => Some(Value::Text(s.clone())),
        ColumnValue::Integer(i) => Some(Value::Integer(*i)),
        ColumnValue::Real(f) => Some(Value::Real(*f)),
        ColumnValue::Boolean(b) => Some(Value::Integer(i64::from(*b))),
    }
}

fn from_sqlite(value: ValueRef<'_>) -> ColumnValue {
    match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(i) => ColumnValue::Integer(i),
        ValueRef::Real(f) => ColumnValue::Real(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            ColumnValue::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

#[async_trait]
impl TableStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn test_connection(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
            Ok(())
        })
    }

    async fn row_exists(&self, table: &str, id: &str) -> Result<bool> {
        let query = sql::exists(Dialect::Sqlite, table)?;
        self.with_conn(|conn| Ok(conn.prepare(&query)?.exists([id])?))
    }

    async fn ensure_table(&self, table: &str, row: &FlatRow) -> Result<()> {
        let statement = sql::create_table(Dialect::Sqlite, table, row)?;
        self.with_conn(|conn| {
            conn.execute(&statement, [])?;
            Ok(())
        })
    }

    async fn insert_row(&self, table: &str, row: &FlatRow) -> Result<()> {
        let (statement, _) = sql::insert(Dialect::Sqlite, table, row)?;
        let params: Vec<Value> = row.iter().filter_map(|(_, value)| to_sqlite(value)).collect();
        self.with_conn(|conn| {
            conn.execute(&statement, params_from_iter(params.iter()))?;
            Ok(())
        })
    }

    async fn row_count(&self, table: &str) -> Result<u64> {
        let query = sql::count(table)?;
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(&query, [], |r| r.get(0))?;
            Ok(count.max(0) as u64)
        })
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let query = format!("PRAGMA table_info({})", sql::quote_identifier(table)?);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&query)?;
            let columns = stmt
                .query_map([], |r| r.get::<_, String>(1))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(columns)
        })
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )?;
            let tables = stmt
                .query_map([], |r| r.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tables)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_row(id: &str) -> FlatRow {
        let mut row = FlatRow::new();
        row.insert("id", id);
        row.insert("gender", "female");
        row.insert("deceased", false);
        row.insert("deceased_date", None::<&str>);
        row
    }

    #[tokio::test]
    async fn test_missing_table_errors_on_exists() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.row_exists("Patient", "p1").await.is_err());
        assert!(store.table_columns("Patient").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_insert_and_read_back() {
        let store = SqliteStore::open_in_memory().unwrap();
        let row = patient_row("p1");

        store.ensure_table("Patient", &row).await.unwrap();
        store.insert_row("Patient", &row).await.unwrap();

        assert!(store.row_exists("Patient", "p1").await.unwrap());
        assert!(!store.row_exists("Patient", "p2").await.unwrap());
        assert_eq!(store.row_count("Patient").await.unwrap(), 1);
        assert_eq!(
            store.table_columns("Patient").await.unwrap(),
            vec!["id", "gender", "deceased", "deceased_date"]
        );
        assert_eq!(store.list_tables().await.unwrap(), vec!["Patient"]);

        let stored = store.fetch_row("Patient", "p1").unwrap().unwrap();
        assert_eq!(stored.get("gender"), Some(&ColumnValue::Text("female".to_string())));
        assert_eq!(stored.get("deceased"), Some(&ColumnValue::Integer(0)));
        assert_eq!(stored.get("deceased_date"), Some(&ColumnValue::Null));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_by_primary_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        let row = patient_row("p1");
        store.ensure_table("Patient", &row).await.unwrap();
        store.insert_row("Patient", &row).await.unwrap();

        let err = store.insert_row("Patient", &row).await.unwrap_err();
        assert!(matches!(err, IngestError::Database(_)));
    }

    #[tokio::test]
    async fn test_ensure_table_leaves_existing_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ensure_table("Patient", &patient_row("p1")).await.unwrap();

        let mut wider = patient_row("p2");
        wider.insert("extra", "x");
        store.ensure_table("Patient", &wider).await.unwrap();

        assert_eq!(store.table_columns("Patient").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("etl.db");
        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        store.test_connection().await.unwrap();
        assert!(path.exists());
    }
}
