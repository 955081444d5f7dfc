use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::schema::TableSpec;

pub async fn create_table_if_not_exists<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    table: &TableSpec,
) -> Res<()> {
    sqlx::query(&table.create_statement())
        .execute(executor)
        .await
        .map(|_| ())
        .map_err(AppError::from)
}

/// Trivial read used to tell a missing table apart from other failures.
pub async fn probe_table<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    table: &TableSpec,
) -> Res<()> {
    sqlx::query(&table.probe_statement())
        .fetch_optional(executor)
        .await
        .map(|_| ())
        .map_err(AppError::from)
}

/// Runs a raw statement (possibly several, `;`-separated) without binds.
pub async fn execute_sql<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    sql: &'e str,
) -> Res<()> {
    sqlx::raw_sql(sql)
        .execute(executor)
        .await
        .map(|_| ())
        .map_err(AppError::from)
}
