use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use common::error::Res;
use db::{
    dtos::invoice::InvoiceAmount,
    models::{customer::CustomerName, invoice::InvoiceRef},
};
use log::{debug, error, warn};
use uuid::Uuid;

/// Amount the dashboard filters invoices on.
pub const TARGET_AMOUNT: i32 = 666;

/// Direct SQL access: one joined SELECT.
#[async_trait]
pub trait SqlInvoices: Send + Sync {
    async fn invoices_by_amount(&self, amount: i32) -> Res<Vec<InvoiceAmount>>;
}

/// REST access: the `get_invoices_by_amount` function, or two plain selects.
#[async_trait]
pub trait RestInvoices: Send + Sync {
    async fn rpc_invoices_by_amount(&self, amount: i32) -> Res<Vec<InvoiceAmount>>;
    async fn invoices_with_amount(&self, amount: i32) -> Res<Vec<InvoiceRef>>;
    async fn customer_names(&self, ids: &[Uuid]) -> Res<Vec<CustomerName>>;
}

#[derive(Clone)]
pub struct QueryService {
    sql: Option<Arc<dyn SqlInvoices>>,
    rest: Arc<dyn RestInvoices>,
}

impl QueryService {
    pub fn new(sql: Option<Arc<dyn SqlInvoices>>, rest: Arc<dyn RestInvoices>) -> Self {
        QueryService { sql, rest }
    }

    /// Invoices of exactly `amount` with their customer's name.
    ///
    /// Tries direct SQL, then the RPC, then a manual join of two REST selects.
    /// An empty SQL result or a SQL error moves on to the RPC; an RPC error
    /// moves on to the manual join, whose errors are returned.
    pub async fn list_invoices(&self, amount: i32) -> Res<Vec<InvoiceAmount>> {
        if let Some(sql) = &self.sql {
            match sql.invoices_by_amount(amount).await {
                Ok(rows) if !rows.is_empty() => return Ok(rows),
                Ok(_) => debug!("Direct SQL found no invoices of {}, trying RPC", amount),
                Err(e) => error!("Error with postgres client: {}", e),
            }
        }

        match self.rest.rpc_invoices_by_amount(amount).await {
            Ok(rows) => return Ok(rows),
            Err(e) if e.is_undefined_function() => {
                debug!("get_invoices_by_amount is not installed, joining manually")
            }
            Err(e) => warn!("RPC error, using direct query: {}", e),
        }

        let invoices = self.rest.invoices_with_amount(amount).await?;
        if invoices.is_empty() {
            return Ok(Vec::new());
        }

        let mut customer_ids: Vec<Uuid> = invoices.iter().map(|i| i.customer_id).collect();
        customer_ids.sort_unstable();
        customer_ids.dedup();

        let customers = self.rest.customer_names(&customer_ids).await?;
        Ok(join_customer_names(invoices, &customers))
    }
}

/// Pairs every invoice with its customer's name; unknown customers give `None`.
pub fn join_customer_names(
    invoices: Vec<InvoiceRef>,
    customers: &[CustomerName],
) -> Vec<InvoiceAmount> {
    let names: HashMap<Uuid, &str> = customers
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    invoices
        .into_iter()
        .map(|invoice| InvoiceAmount {
            amount: invoice.amount,
            name: names.get(&invoice.customer_id).map(|name| name.to_string()),
        })
        .collect()
}
