use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Amount in cents.
    pub amount: i32,
    pub status: String, // pending or paid
    pub date: NaiveDate,
}

/// Invoice columns needed to join a customer name in memory.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct InvoiceRef {
    pub amount: i32,
    pub customer_id: Uuid,
}
