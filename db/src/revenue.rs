use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};

use crate::models::revenue::Revenue;

pub async fn upsert_revenue<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    revenue: &[Revenue],
) -> Res<()> {
    if revenue.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO revenue (month, revenue) ");
    qb.push_values(revenue, |mut row, sample| {
        row.push_bind(sample.month.clone()).push_bind(sample.revenue);
    });
    qb.push(" ON CONFLICT (month) DO UPDATE SET revenue = EXCLUDED.revenue");

    qb.build().execute(executor).await.map_err(AppError::from)?;
    Ok(())
}
