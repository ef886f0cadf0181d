use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::session::{self, Permissions};
use crate::auth::{csrf, password, rate_limit::RateLimiter};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::{permission, user};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, config: &AppConfig, error: Option<&str>) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: error.map(String::from),
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if session::get_user_id(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    login_form(&session, &config, None)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check before any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Login blocked for {ip}: too many failed attempts");
        return login_form(
            &session,
            &config,
            Some("Too many failed login attempts. Please try again later."),
        );
    }

    let found = user::find_by_username(&pool, &form.username).await?;
    let verified = match &found {
        Some(u) => password::verify_password(&form.password, &u.password).unwrap_or_else(|e| {
            log::error!("Stored password hash for '{}' is unreadable: {e}", u.username);
            false
        }),
        None => false,
    };

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            let codes = permission::find_codes_by_user_id(&pool, u.id).await?;
            session::sign_in(&session, u.id, &u.username, &Permissions(codes))?;
            log::info!("User '{}' logged in", u.username);
            Ok(redirect("/dashboard"))
        }
        _ => {
            limiter.record_failure(ip);
            log::info!("Failed login for '{}' from {ip}", form.username);
            login_form(&session, &config, Some("Invalid username or password"))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(redirect("/login"))
}
