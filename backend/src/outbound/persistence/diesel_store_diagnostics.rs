//! Table listing probe used by the diagnostics endpoint.

use async_trait::async_trait;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreDiagnostics, StoreDiagnosticsError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::TableNameRow;
use super::pool::DbPool;

const LIST_TABLES_SQL: &str = "SELECT table_name::text AS table_name \
     FROM information_schema.tables \
     WHERE table_schema = current_schema() \
       AND table_type = 'BASE TABLE' \
       AND table_name <> '__diesel_schema_migrations' \
     ORDER BY table_name \
     LIMIT $1";

/// Lists application tables in the connected schema.
#[derive(Clone)]
pub struct DieselStoreDiagnostics {
    pool: DbPool,
}

impl DieselStoreDiagnostics {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreDiagnostics for DieselStoreDiagnostics {
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreDiagnosticsError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<StoreDiagnosticsError>)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<TableNameRow> = diesel::sql_query(LIST_TABLES_SQL)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<StoreDiagnosticsError>)?;
        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }
}
