use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};

use crate::services::query::{QueryService, TARGET_AMOUNT};

/// Lists the invoices of the dashboard's fixed amount with customer names.
///
/// # Output
/// - Success: `200 [{"amount": 666, "name": "Evil Rabbit"}]`, possibly `[]`
/// - Error: `500 {"error": "..."}`
#[get("")]
pub async fn get_query(service: web::Data<QueryService>) -> Res<impl Responder> {
    let invoices = service
        .list_invoices(TARGET_AMOUNT)
        .await
        .inspect_err(|e| log::error!("Error fetching invoices: {}", e))?;
    Success::ok(invoices)
}
