use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::user::User;

pub async fn upsert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user: &User,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name, email = EXCLUDED.email, password = EXCLUDED.password
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}
