use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::source::StatsSource;
use crate::models::{project, ticket::{self, TicketRecord}, user};

/// An in-memory copy of the ticketing data, evaluated with the per-ticket predicates
/// on [`TicketRecord`]. Never fails.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub projects: i64,
    pub users: i64,
    pub tickets: Vec<TicketRecord>,
}

impl Snapshot {
    pub fn new(projects: i64, users: i64, tickets: Vec<TicketRecord>) -> Self {
        Self { projects, users, tickets }
    }

    /// Read the current database state into memory.
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let (projects, users, tickets) = tokio::try_join!(
            project::count(pool),
            user::count(pool),
            ticket::find_all_records(pool),
        )?;
        Ok(Self { projects, users, tickets })
    }

    fn count_where<F: Fn(&TicketRecord) -> bool>(&self, pred: F) -> i64 {
        self.tickets.iter().filter(|t| pred(t)).count() as i64
    }
}

impl StatsSource for Snapshot {
    async fn count_projects(&self) -> Result<i64, sqlx::Error> {
        Ok(self.projects)
    }

    async fn count_tickets(&self) -> Result<i64, sqlx::Error> {
        Ok(self.tickets.len() as i64)
    }

    async fn count_tickets_created_since(&self, cutoff: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        Ok(self.count_where(|t| t.is_new_since(cutoff)))
    }

    async fn count_users(&self) -> Result<i64, sqlx::Error> {
        Ok(self.users)
    }

    async fn count_unassigned_tickets(&self) -> Result<i64, sqlx::Error> {
        Ok(self.count_where(TicketRecord::is_unassigned))
    }

    async fn count_tickets_assigned_to(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        Ok(self.count_where(|t| t.is_assigned_to(user_id)))
    }

    async fn count_tickets_created_by(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        Ok(self.count_where(|t| t.is_created_by(user_id)))
    }

    async fn count_overdue_tickets(&self, now: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        Ok(self.count_where(|t| t.is_overdue_at(now)))
    }
}
