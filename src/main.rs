use std::io;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use pushkind_content::db::{establish_connection_pool, run_migrations};
use pushkind_content::models::config::ServerConfig;
use pushkind_content::repository::DieselRepository;
use pushkind_content::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to establish database connection: {e}");
        io::Error::other(e)
    })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("Failed to run database migrations: {e}");
        io::Error::other(e)
    })?;

    std::fs::create_dir_all(&server_config.upload_dir)?;
    if server_config.api_tokens.is_empty() {
        log::warn!("No api_tokens configured; every write request will be rejected");
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting content service on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(routes::configure)
            .service(routes::media::uploads(&server_config.upload_dir))
    })
    .bind(bind_address)?
    .run()
    .await
}
