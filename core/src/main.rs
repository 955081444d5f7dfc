mod cors;

use actix_web::{App, HttpServer, web};
use common::{env_config::Config, supabase};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_file, config.is_production()).expect("Failed to set up logger");
    }

    // init clients
    let admin = supabase::create_admin_client(&config);
    let pool = db::setup(&config.postgres_url, config.postgres_require_ssl);

    let seeder = api_seed::build_seeder(&config, pool.clone(), admin.clone());
    let query = api_query::build_query_service(pool, admin);

    let origin = config.cors_allowed_origin.clone();
    let console_logging_enabled = config.console_logging_enabled;

    log::info!(
        "Listening on {}:{} ({} workers)",
        config.server_host,
        config.server_port,
        config.num_workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(seeder.clone()))
            .app_data(web::Data::new(query.clone()))
            .wrap(logger::middleware(console_logging_enabled)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(api_seed::mount_seed())
            .service(api_query::mount_query())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
