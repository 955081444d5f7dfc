use async_trait::async_trait;
use common::{
    error::Res,
    supabase::{SupabaseClient, in_filter},
};
use db::{
    dtos::invoice::InvoiceAmount,
    models::{customer::CustomerName, invoice::InvoiceRef},
    schema,
};
use serde_json::json;
use uuid::Uuid;

use crate::services::query::RestInvoices;

pub struct RestInvoiceSource {
    client: SupabaseClient,
}

impl RestInvoiceSource {
    pub fn new(client: SupabaseClient) -> Self {
        RestInvoiceSource { client }
    }
}

#[async_trait]
impl RestInvoices for RestInvoiceSource {
    async fn rpc_invoices_by_amount(&self, amount: i32) -> Res<Vec<InvoiceAmount>> {
        let rows = self
            .client
            .rpc("get_invoices_by_amount", &json!({ "amount_param": amount }))
            .await?;
        Ok(rows)
    }

    async fn invoices_with_amount(&self, amount: i32) -> Res<Vec<InvoiceRef>> {
        let rows = self
            .client
            .select(
                schema::INVOICES.name,
                "amount,customer_id",
                &[("amount", format!("eq.{}", amount))],
            )
            .await?;
        Ok(rows)
    }

    async fn customer_names(&self, ids: &[Uuid]) -> Res<Vec<CustomerName>> {
        let rows = self
            .client
            .select(schema::CUSTOMERS.name, "id,name", &[("id", in_filter(ids))])
            .await?;
        Ok(rows)
    }
}
