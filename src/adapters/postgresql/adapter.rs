//! PostgreSQL adapter implementing [`TableStore`]
//!
//! Tables live in the connection's current schema. Metadata queries go
//! through `information_schema` scoped by `current_schema()`.

use crate::adapters::database::sql::{self, Dialect};
use crate::adapters::database::traits::TableStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::domain::{ColumnValue, FlatRow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// PostgreSQL implementation of the table store
pub struct PostgreSQLStore {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLStore {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

/// Owned driver parameter for a non-null column value
fn to_param(value: &ColumnValue) -> Option<Box<dyn ToSql + Sync + Send>> {
    match value {
        ColumnValue::Null => None,
        ColumnValue::Text(s) => Some(Box::new(s.clone())),
        ColumnValue::Integer(i) => Some(Box::new(*i)),
        ColumnValue::Real(f) => Some(Box::new(*f)),
        ColumnValue::Boolean(b) => Some(Box::new(*b)),
    }
}

#[async_trait]
impl TableStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn row_exists(&self, table: &str, id: &str) -> Result<bool> {
        let query = sql::exists(Dialect::Postgres, table)?;
        let rows = self.client.query(&query, &[&id]).await?;
        Ok(!rows.is_empty())
    }

    async fn ensure_table(&self, table: &str, row: &FlatRow) -> Result<()> {
        let statement = sql::create_table(Dialect::Postgres, table, row)?;
        self.client.execute(&statement, &[]).await?;
        Ok(())
    }

    async fn insert_row(&self, table: &str, row: &FlatRow) -> Result<()> {
        let (statement, _) = sql::insert(Dialect::Postgres, table, row)?;

        let owned: Vec<Box<dyn ToSql + Sync + Send>> =
            row.iter().filter_map(|(_, value)| to_param(value)).collect();
        let params: Vec<&(dyn ToSql + Sync)> = owned
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        self.client.execute(&statement, &params).await?;
        Ok(())
    }

    async fn row_count(&self, table: &str) -> Result<u64> {
        let query = sql::count(table)?;
        let rows = self.client.query(&query, &[]).await?;
        let count: i64 = rows.first().map(|r| r.get(0)).unwrap_or(0);
        Ok(count.max(0) as u64)
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let rows = self
            .client
            .query(
                "SELECT column_name::text FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = $1 \
                 ORDER BY ordinal_position",
                &[&table],
            )
            .await?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let rows = self
            .client
            .query(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND table_type = 'BASE TABLE' \
                 ORDER BY table_name",
                &[],
            )
            .await?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }
}
