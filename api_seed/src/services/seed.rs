use std::sync::Arc;

use async_trait::async_trait;
use common::error::Res;
use db::{
    models::{customer::Customer, invoice::Invoice, revenue::Revenue, user::User},
    schema::{self, TableSpec},
    seed_data,
};
use log::{debug, error, info, warn};

use crate::misc::password;

/// Where the seeder writes. Implemented over the REST API and over a direct
/// Postgres pool.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn create_table_if_not_exists(&self, table: &TableSpec) -> Res<()>;
    async fn probe_table(&self, table: &TableSpec) -> Res<()>;
    async fn execute_sql(&self, sql: &str) -> Res<()>;
    async fn upsert_user(&self, user: &User) -> Res<()>;
    async fn upsert_customers(&self, customers: &[Customer]) -> Res<()>;
    async fn upsert_invoices(&self, invoices: &[Invoice]) -> Res<()>;
    async fn upsert_revenue(&self, revenue: &[Revenue]) -> Res<()>;
}

#[derive(Clone)]
pub struct Seeder {
    store: Arc<dyn SeedStore>,
}

impl Seeder {
    pub fn new(store: Arc<dyn SeedStore>) -> Self {
        Seeder { store }
    }

    /// Seeds users, customers, invoices and revenue, in that order.
    ///
    /// Upsert failures are logged and skipped. Only a failure to create a
    /// missing table (or to hash a password) aborts the run.
    pub async fn seed(&self) -> Res<()> {
        self.seed_users().await?;
        self.seed_customers().await?;
        self.seed_invoices().await?;
        self.seed_revenue().await?;
        info!("Database seeded successfully");
        Ok(())
    }

    async fn ensure_table(&self, table: &TableSpec) -> Res<()> {
        let Err(create_error) = self.store.create_table_if_not_exists(table).await else {
            debug!("Table {} is ready", table.name);
            return Ok(());
        };
        if create_error.is_undefined_function() {
            debug!("create_table_if_not_exists is not installed, probing {}", table.name);
        } else {
            warn!(
                "create_table_if_not_exists failed for {}: {}",
                table.name, create_error
            );
        }

        match self.store.probe_table(table).await {
            Ok(()) => debug!("Table {} already exists", table.name),
            Err(probe_error) if probe_error.is_undefined_table() => {
                info!("Table {} does not exist, creating it with raw SQL", table.name);
                self.store.execute_sql(&table.create_statement()).await?;
            }
            Err(probe_error) => warn!("Could not probe table {}: {}", table.name, probe_error),
        }
        Ok(())
    }

    async fn seed_users(&self) -> Res<()> {
        self.ensure_table(&schema::USERS).await?;

        for request in seed_data::users() {
            let user = User {
                password: password::hash_password(&request.password)?,
                id: request.id,
                name: request.name,
                email: request.email,
            };
            if let Err(e) = self.store.upsert_user(&user).await {
                error!("Error inserting user {}: {}", user.email, e);
            }
        }
        Ok(())
    }

    async fn seed_customers(&self) -> Res<()> {
        self.ensure_table(&schema::CUSTOMERS).await?;

        if let Err(e) = self.store.upsert_customers(&seed_data::customers()).await {
            error!("Error inserting customers: {}", e);
        }
        Ok(())
    }

    async fn seed_invoices(&self) -> Res<()> {
        self.ensure_table(&schema::INVOICES).await?;

        if let Err(e) = self.store.upsert_invoices(&seed_data::invoices()).await {
            error!("Error inserting invoices: {}", e);
        }
        Ok(())
    }

    async fn seed_revenue(&self) -> Res<()> {
        self.ensure_table(&schema::REVENUE).await?;

        if let Err(e) = self.store.upsert_revenue(&seed_data::revenue()).await {
            error!("Error inserting revenue: {}", e);
        }
        Ok(())
    }
}
