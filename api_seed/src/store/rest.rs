use async_trait::async_trait;
use common::{error::Res, supabase::SupabaseClient};
use db::{
    models::{customer::Customer, invoice::Invoice, revenue::Revenue, user::User},
    schema::{self, TableSpec},
};
use serde_json::{Value, json};

use crate::services::seed::SeedStore;

/// Seeds through the REST API with the service-role client.
///
/// Table creation relies on two optional database functions,
/// `create_table_if_not_exists(table_name, table_definition)` and
/// `execute_sql(sql)`.
pub struct RestSeedStore {
    client: SupabaseClient,
}

impl RestSeedStore {
    pub fn new(client: SupabaseClient) -> Self {
        RestSeedStore { client }
    }
}

#[async_trait]
impl SeedStore for RestSeedStore {
    async fn create_table_if_not_exists(&self, table: &TableSpec) -> Res<()> {
        self.client
            .rpc::<_, Value>(
                "create_table_if_not_exists",
                &json!({ "table_name": table.name, "table_definition": table.definition }),
            )
            .await?;
        Ok(())
    }

    async fn probe_table(&self, table: &TableSpec) -> Res<()> {
        self.client
            .select::<Value>(table.name, table.key_column, &[("limit", "1".to_string())])
            .await?;
        Ok(())
    }

    async fn execute_sql(&self, sql: &str) -> Res<()> {
        self.client
            .rpc::<_, Value>("execute_sql", &json!({ "sql": sql }))
            .await?;
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> Res<()> {
        let users = schema::USERS;
        self.client
            .upsert(users.name, std::slice::from_ref(user), users.key_column)
            .await?;
        Ok(())
    }

    async fn upsert_customers(&self, customers: &[Customer]) -> Res<()> {
        let table = schema::CUSTOMERS;
        self.client
            .upsert(table.name, customers, table.key_column)
            .await?;
        Ok(())
    }

    async fn upsert_invoices(&self, invoices: &[Invoice]) -> Res<()> {
        let table = schema::INVOICES;
        self.client
            .upsert(table.name, invoices, table.key_column)
            .await?;
        Ok(())
    }

    async fn upsert_revenue(&self, revenue: &[Revenue]) -> Res<()> {
        let table = schema::REVENUE;
        self.client
            .upsert(table.name, revenue, table.key_column)
            .await?;
        Ok(())
    }
}
