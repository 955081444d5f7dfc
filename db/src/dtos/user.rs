use uuid::Uuid;

/// A user as it appears in the seed dataset, with its plaintext password.
pub struct UserCreateRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}
