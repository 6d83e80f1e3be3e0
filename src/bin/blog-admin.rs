use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use blog_publisher::db::open_store;
use blog_publisher::models::config::ServerConfig;
use blog_publisher::repository::DieselRepository;
use blog_publisher::routes::{configure_admin, flash_middleware, session_middleware};
use tera::Tera;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match open_store(&server_config.store()) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open the store: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    let key = server_config.cookie_key();
    let address = (server_config.bind_address.clone(), server_config.admin_port);
    log::info!(
        "Starting blog admin on {}:{} ({})",
        address.0,
        address.1,
        server_config.environment.as_str()
    );

    let server_config = web::Data::new(server_config);
    let repo = web::Data::new(repo);
    let tera = web::Data::new(tera);

    HttpServer::new(move || {
        App::new()
            .wrap(flash_middleware(key.clone()))
            .wrap(session_middleware(key.clone()))
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(server_config.clone())
            .app_data(tera.clone())
            .configure(|cfg| configure_admin(cfg, &server_config))
    })
    .bind(address)?
    .run()
    .await
}
