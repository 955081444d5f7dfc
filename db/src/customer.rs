use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};

use crate::models::customer::Customer;

pub async fn upsert_customers<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customers: &[Customer],
) -> Res<()> {
    if customers.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO customers (id, name, email, image_url) ");
    qb.push_values(customers, |mut row, customer| {
        row.push_bind(customer.id)
            .push_bind(customer.name.clone())
            .push_bind(customer.email.clone())
            .push_bind(customer.image_url.clone());
    });
    qb.push(
        " ON CONFLICT (id) DO UPDATE \
         SET name = EXCLUDED.name, email = EXCLUDED.email, image_url = EXCLUDED.image_url",
    );

    qb.build().execute(executor).await.map_err(AppError::from)?;
    Ok(())
}
