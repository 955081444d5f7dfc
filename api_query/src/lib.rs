use std::sync::Arc;

use actix_web::web;
use common::supabase::SupabaseClient;
use services::query::{QueryService, SqlInvoices};
use source::{pg::PgInvoices, rest::RestInvoiceSource};
use sqlx::PgPool;

pub mod routes {
    pub mod query;
}
pub mod services {
    pub mod query;
}
pub mod source {
    pub mod pg;
    pub mod rest;
}

pub fn mount_query() -> actix_web::Scope {
    web::scope("/query").service(routes::query::get_query)
}

/// Direct SQL goes first when a pool is configured, REST covers the rest.
pub fn build_query_service(pool: Option<PgPool>, admin: SupabaseClient) -> QueryService {
    let sql = pool.map(|pool| Arc::new(PgInvoices::new(pool)) as Arc<dyn SqlInvoices>);
    QueryService::new(sql, Arc::new(RestInvoiceSource::new(admin)))
}
