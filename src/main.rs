use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use ticketdesk::auth::{password, rate_limit::RateLimiter};
use ticketdesk::config::{self, AppConfig};
use ticketdesk::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env first, so RUST_LOG from the file reaches the logger
    let env_file = config::load_env_file();
    env_logger::init();
    if let Some(path) = env_file {
        log::info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;

    let admin_hash = password::hash_password(&config.admin_password).map_err(std::io::Error::other)?;
    db::seed_base(&pool, &admin_hash).await.map_err(std::io::Error::other)?;
    if config.seed_demo {
        db::seed_demo(&pool, &admin_hash).await.map_err(std::io::Error::other)?;
    }

    let secret_key = config.cookie_key();
    let limiter = RateLimiter::new();
    let bind_addr = config.bind_addr.clone();

    log::info!(
        "Starting server at http://{} (stats refresh every {}s)",
        bind_addr,
        config.stats_poll_seconds
    );

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(false)
            .cookie_http_only(true)
            .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(limiter.clone()))
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
