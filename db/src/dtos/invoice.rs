use serde::{Deserialize, Serialize};

/// One row of the invoice query: the amount and its customer's name, which is
/// `None` when the referenced customer is missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::FromRow, Serialize, Deserialize)]
pub struct InvoiceAmount {
    pub amount: i32,
    pub name: Option<String>,
}
