use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};

use crate::{dtos::invoice::InvoiceAmount, models::invoice::Invoice};

pub async fn upsert_invoices<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    invoices: &[Invoice],
) -> Res<()> {
    if invoices.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO invoices (id, customer_id, amount, status, date) ");
    qb.push_values(invoices, |mut row, invoice| {
        row.push_bind(invoice.id)
            .push_bind(invoice.customer_id)
            .push_bind(invoice.amount)
            .push_bind(invoice.status.clone())
            .push_bind(invoice.date);
    });
    qb.push(
        " ON CONFLICT (id) DO UPDATE \
         SET customer_id = EXCLUDED.customer_id, amount = EXCLUDED.amount, \
         status = EXCLUDED.status, date = EXCLUDED.date",
    );

    qb.build().execute(executor).await.map_err(AppError::from)?;
    Ok(())
}

/// Invoices of exactly `amount`, joined to their customer's name.
pub async fn get_invoices_by_amount<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    amount: i32,
) -> Res<Vec<InvoiceAmount>> {
    sqlx::query_as::<_, InvoiceAmount>(
        r#"
        SELECT invoices.amount, customers.name
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE invoices.amount = $1
        "#,
    )
    .bind(amount)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
