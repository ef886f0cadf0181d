use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Local, Timelike, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::session::{get_user_id, require_permission};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::permission::DASHBOARD_STATS;
use crate::stats::{self, StatCard, StatsContext};
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(hour: u32, username: &str) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {username}")
}

/// Payload for the dashboard's periodic refresh.
#[derive(Serialize)]
pub struct StatsResponse {
    pub generated_at: DateTime<Utc>,
    pub poll_seconds: u64,
    pub cards: Vec<StatCard>,
}

pub async fn index(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config.app_name)?;
    let greeting = time_greeting(Local::now().hour(), &ctx.username);

    let stats = if ctx.permissions.has(DASHBOARD_STATS) {
        let stats_ctx = StatsContext::at_now(get_user_id(&session));
        Some(stats::compute_cards(pool.get_ref(), &stats_ctx).await?)
    } else {
        None
    };

    let tmpl = DashboardTemplate {
        ctx,
        greeting,
        stats,
        poll_seconds: config.stats_poll_seconds,
    };
    render(tmpl)
}

/// GET /dashboard/stats - current cards as JSON, polled by the dashboard page.
pub async fn stats_json(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, DASHBOARD_STATS)?;

    let stats_ctx = StatsContext::at_now(get_user_id(&session));
    let cards = stats::compute_cards(pool.get_ref(), &stats_ctx).await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        generated_at: stats_ctx.now,
        poll_seconds: config.stats_poll_seconds,
        cards,
    }))
}
