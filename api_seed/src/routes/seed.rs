use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};

use crate::services::seed::Seeder;

/// Populates the users, customers, invoices and revenue tables with the
/// fixed development dataset.
///
/// # Output
/// - Success: `200 {"message": "Database seeded successfully"}`
/// - Error: `500 {"error": "..."}` when a step outside the per-table
///   fallbacks fails
#[get("")]
pub async fn get_seed(seeder: web::Data<Seeder>) -> Res<impl Responder> {
    seeder
        .seed()
        .await
        .inspect_err(|e| log::error!("Seeding error: {}", e))?;
    Success::message("Database seeded successfully")
}
