use async_trait::async_trait;
use common::error::Res;
use db::{
    models::{customer::Customer, invoice::Invoice, revenue::Revenue, user::User},
    schema::TableSpec,
};
use sqlx::PgPool;

use crate::services::seed::SeedStore;

/// Seeds straight into Postgres. Creating a table is the DDL statement itself.
pub struct PgSeedStore {
    pool: PgPool,
}

impl PgSeedStore {
    pub fn new(pool: PgPool) -> Self {
        PgSeedStore { pool }
    }
}

#[async_trait]
impl SeedStore for PgSeedStore {
    async fn create_table_if_not_exists(&self, table: &TableSpec) -> Res<()> {
        db::table::create_table_if_not_exists(&self.pool, table).await
    }

    async fn probe_table(&self, table: &TableSpec) -> Res<()> {
        db::table::probe_table(&self.pool, table).await
    }

    async fn execute_sql(&self, sql: &str) -> Res<()> {
        db::table::execute_sql(&self.pool, sql).await
    }

    async fn upsert_user(&self, user: &User) -> Res<()> {
        db::user::upsert_user(&self.pool, user).await
    }

    async fn upsert_customers(&self, customers: &[Customer]) -> Res<()> {
        db::customer::upsert_customers(&self.pool, customers).await
    }

    async fn upsert_invoices(&self, invoices: &[Invoice]) -> Res<()> {
        db::invoice::upsert_invoices(&self.pool, invoices).await
    }

    async fn upsert_revenue(&self, revenue: &[Revenue]) -> Res<()> {
        db::revenue::upsert_revenue(&self.pool, revenue).await
    }
}
