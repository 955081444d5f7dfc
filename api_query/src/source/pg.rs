use async_trait::async_trait;
use common::error::Res;
use db::dtos::invoice::InvoiceAmount;
use sqlx::PgPool;

use crate::services::query::SqlInvoices;

pub struct PgInvoices {
    pool: PgPool,
}

impl PgInvoices {
    pub fn new(pool: PgPool) -> Self {
        PgInvoices { pool }
    }
}

#[async_trait]
impl SqlInvoices for PgInvoices {
    async fn invoices_by_amount(&self, amount: i32) -> Res<Vec<InvoiceAmount>> {
        db::invoice::get_invoices_by_amount(&self.pool, amount).await
    }
}
