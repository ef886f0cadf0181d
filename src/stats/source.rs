use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;

use crate::models::{project, ticket, ticket_status::TERMINAL_STATUSES, user};

/// Where the dashboard counters come from. Every method is a single aggregate count.
pub trait StatsSource: Sync {
    fn count_projects(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn count_tickets(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tickets created at or after `cutoff`.
    fn count_tickets_created_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn count_users(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tickets with no assignee rows at all.
    fn count_unassigned_tickets(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn count_tickets_assigned_to(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn count_tickets_created_by(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tickets due strictly before `now` whose status exists and is not terminal.
    fn count_overdue_tickets(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl StatsSource for PgPool {
    async fn count_projects(&self) -> Result<i64, sqlx::Error> {
        project::count(self).await
    }

    async fn count_tickets(&self) -> Result<i64, sqlx::Error> {
        ticket::count(self).await
    }

    async fn count_tickets_created_since(&self, cutoff: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets WHERE created_at >= $1")
            .bind(cutoff)
            .fetch_one(self)
            .await?;
        Ok(n)
    }

    async fn count_users(&self) -> Result<i64, sqlx::Error> {
        user::count(self).await
    }

    async fn count_unassigned_tickets(&self) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets t \
             WHERE NOT EXISTS (SELECT 1 FROM ticket_assignees a WHERE a.ticket_id = t.id)",
        )
        .fetch_one(self)
        .await?;
        Ok(n)
    }

    async fn count_tickets_assigned_to(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets t \
             WHERE EXISTS (SELECT 1 FROM ticket_assignees a \
                           WHERE a.ticket_id = t.id AND a.user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(self)
        .await?;
        Ok(n)
    }

    async fn count_tickets_created_by(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets WHERE created_by = $1")
            .bind(user_id)
            .fetch_one(self)
            .await?;
        Ok(n)
    }

    async fn count_overdue_tickets(&self, now: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        // Inner join: a ticket without a status never qualifies.
        // due_date is compared as midnight UTC of that day.
        let terminal: Vec<String> = TERMINAL_STATUSES.iter().map(|s| s.to_string()).collect();
        let (n,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets t \
             JOIN ticket_statuses s ON s.id = t.status_id \
             WHERE t.due_date IS NOT NULL \
               AND t.due_date::timestamp < $1 \
               AND NOT (s.name = ANY($2))",
        )
        .bind(now.naive_utc())
        .bind(terminal)
        .fetch_one(self)
        .await?;
        Ok(n)
    }
}
