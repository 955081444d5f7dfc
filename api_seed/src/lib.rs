use std::sync::Arc;

use actix_web::web;
use common::{
    env_config::{Config, SeedBackend},
    supabase::SupabaseClient,
};
use services::seed::{SeedStore, Seeder};
use sqlx::PgPool;
use store::{pg::PgSeedStore, rest::RestSeedStore};

pub mod routes {
    pub mod seed;
}
pub mod services {
    pub mod seed;
}
pub mod store {
    pub mod pg;
    pub mod rest;
}
pub mod misc {
    pub mod password;
}

pub fn mount_seed() -> actix_web::Scope {
    web::scope("/seed").service(routes::seed::get_seed)
}

/// Picks the store the seeder writes through.
///
/// `SEED_BACKEND=postgres` needs the direct pool; without one the privileged
/// REST client is used instead.
pub fn build_seeder(config: &Config, pool: Option<PgPool>, admin: SupabaseClient) -> Seeder {
    let store: Arc<dyn SeedStore> = match (config.seed_backend, pool) {
        (SeedBackend::Postgres, Some(pool)) => Arc::new(PgSeedStore::new(pool)),
        (SeedBackend::Postgres, None) => {
            log::warn!("SEED_BACKEND=postgres but POSTGRES_URL is empty, seeding through REST");
            Arc::new(RestSeedStore::new(admin))
        }
        (SeedBackend::Rest, _) => Arc::new(RestSeedStore::new(admin)),
    };
    Seeder::new(store)
}
