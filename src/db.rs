use chrono::{Duration, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::errors::AppError;
use crate::models::permission::{self, DASHBOARD_STATS};
use crate::models::ticket::{self, NewTicket};
use crate::models::user::{self, NewUser};
use crate::models::{project, ticket_status};

pub type DbPool = PgPool;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(database_url: &str) -> Result<DbPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Seed ticket statuses and the admin account. Safe to run on every start.
pub async fn seed_base(pool: &DbPool, admin_password_hash: &str) -> Result<(), AppError> {
    for (i, name) in ticket_status::DEFAULT_STATUSES.iter().enumerate() {
        ticket_status::ensure(pool, name, i as i32).await?;
    }

    let admin_id = match user::find_by_username(pool, "admin").await? {
        Some(existing) => {
            log::info!("Admin user already present (id {}), skipping", existing.id);
            existing.id
        }
        None => {
            let id = user::create(
                pool,
                &NewUser {
                    username: "admin".to_string(),
                    password: admin_password_hash.to_string(),
                    email: "admin@example.com".to_string(),
                    display_name: "Administrator".to_string(),
                },
            )
            .await?;
            log::info!("Created admin user (id {id})");
            id
        }
    };
    permission::grant(pool, admin_id, DASHBOARD_STATS).await?;

    log::info!("Base seed complete");
    Ok(())
}

/// Demo projects, users and tickets for a fresh install. Skipped once any project exists.
pub async fn seed_demo(pool: &DbPool, demo_password_hash: &str) -> Result<(), AppError> {
    let existing = project::count(pool).await?;
    if existing > 0 {
        log::info!("Database already has {existing} projects, skipping demo seed");
        return Ok(());
    }

    let mut user_ids = Vec::new();
    for name in ["alice", "bob", "charlie"] {
        let id = match user::find_by_username(pool, name).await? {
            Some(u) => u.id,
            None => {
                user::create(
                    pool,
                    &NewUser {
                        username: name.to_string(),
                        password: demo_password_hash.to_string(),
                        email: format!("{name}@example.com"),
                        display_name: capitalize(name),
                    },
                )
                .await?
            }
        };
        permission::grant(pool, id, DASHBOARD_STATS).await?;
        user_ids.push(id);
    }

    let website = project::create(pool, "Website Relaunch").await?;
    let billing = project::create(pool, "Billing Migration").await?;

    let open = ticket_status::find_id_by_name(pool, "Open").await?;
    let in_progress = ticket_status::find_id_by_name(pool, "In Progress").await?;
    let done = ticket_status::find_id_by_name(pool, "Done").await?;

    let today = Utc::now().date_naive();
    let now = Utc::now();

    // (project, title, status, creator index, due offset in days, age in days, assignee indexes)
    let demo: [(i64, &str, Option<i64>, usize, Option<i64>, i64, &[usize]); 6] = [
        (website, "Draft landing page copy", open, 0, Some(3), 1, &[1]),
        (website, "Fix broken footer links", in_progress, 1, Some(-2), 10, &[0, 2]),
        (website, "Cookie banner review", open, 2, Some(-1), 4, &[]),
        (billing, "Export legacy invoices", done, 0, Some(-5), 20, &[1]),
        (billing, "Map tax codes", open, 1, None, 2, &[]),
        (billing, "Reconcile March payouts", None, 2, Some(-3), 8, &[0]),
    ];

    for (project_id, title, status_id, creator, due_offset, age_days, assignees) in demo {
        let ticket_id = ticket::create(
            pool,
            &NewTicket {
                project_id,
                title: title.to_string(),
                status_id,
                created_by: user_ids.get(creator).copied(),
                due_date: due_offset.map(|d| today + Duration::days(d)),
                created_at: Some(now - Duration::days(age_days)),
            },
        )
        .await?;
        for idx in assignees {
            if let Some(&uid) = user_ids.get(*idx) {
                ticket::assign(pool, ticket_id, uid).await?;
            }
        }
    }

    log::info!("Demo seed complete: 2 projects, {} users, 6 tickets", user_ids.len());
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
