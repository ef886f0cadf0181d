//! Shared test infrastructure.
//!
//! - `setup_test_db()` - fresh Postgres schema with migrations applied, or `None`
//!   when `DATABASE_URL` is not set (Postgres-backed tests then return early).
//! - `record()` - build an in-memory ticket for `Snapshot`-based tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use ticketdesk::models::ticket::TicketRecord;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const VIEWER: i64 = 1;
pub const OTHER_USER: i64 = 2;

/// Fixed evaluation instant used by the in-memory scenarios.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 18, 14, 30, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    fixed_now() - Duration::days(days)
}

/// Calendar date `days` before `fixed_now()`. Negative values lie in the future.
pub fn date_days_ago(days: i64) -> NaiveDate {
    fixed_now().date_naive() - Duration::days(days)
}

// ============================================================================
// IN-MEMORY RECORDS
// ============================================================================

pub fn record(
    id: i64,
    created_at: DateTime<Utc>,
    due_date: Option<NaiveDate>,
    created_by: Option<i64>,
    status: Option<&str>,
    assignees: &[i64],
) -> TicketRecord {
    TicketRecord {
        id,
        created_at,
        due_date,
        created_by,
        status_name: status.map(String::from),
        assignee_ids: assignees.to_vec(),
    }
}

// ============================================================================
// DATABASE SETUP
// ============================================================================

/// A migrated, throwaway schema inside the database named by `DATABASE_URL`.
pub struct TestDb {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("Failed to drop test schema");
        self.admin.close().await;
    }
}

pub async fn setup_test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
        return None;
    };

    let admin = PgPool::connect(&url).await.expect("Failed to connect to DATABASE_URL");
    let schema = format!("test_{:016x}", rand::random::<u64>());
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                sqlx::query(&format!("SET search_path TO {search_path}"))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("Failed to open test pool");

    ticketdesk::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(TestDb { pool, admin, schema })
}
