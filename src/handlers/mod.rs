pub mod auth_handlers;
pub mod dashboard;

use actix_web::{HttpResponse, web};

use crate::auth::middleware::require_auth;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::templates_structs::NotFoundTemplate;

/// Register every route. Shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/", web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish()
        }))
        // Protected routes
        .service(
            web::scope("/dashboard")
                .wrap(actix_web::middleware::from_fn(require_auth))
                .route("", web::get().to(dashboard::index))
                .route("/stats", web::get().to(dashboard::stats_json)),
        )
        .service(
            web::scope("/logout")
                .wrap(actix_web::middleware::from_fn(require_auth))
                .route("", web::post().to(auth_handlers::logout)),
        );
}

/// Fallback for unknown routes; register with `default_service`.
pub async fn not_found(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let mut resp = render(NotFoundTemplate { app_name: config.app_name.clone() })?;
    *resp.status_mut() = actix_web::http::StatusCode::NOT_FOUND;
    Ok(resp)
}
