use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `users` table. `password` holds the hash, never the plaintext.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}
