use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::ticket_status;

/// Data for inserting a ticket. Assignees are attached separately with `assign`.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub project_id: i64,
    pub title: String,
    pub status_id: Option<i64>,
    pub created_by: Option<i64>,
    pub due_date: Option<NaiveDate>,
    /// `None` lets the database stamp the row with `NOW()`.
    pub created_at: Option<DateTime<Utc>>,
}

/// A ticket with everything the dashboard filters look at.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub created_by: Option<i64>,
    pub status_name: Option<String>,
    pub assignee_ids: Vec<i64>,
}

impl TicketRecord {
    /// Created at or after `cutoff` (inclusive).
    pub fn is_new_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at >= cutoff
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee_ids.is_empty()
    }

    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assignee_ids.contains(&user_id)
    }

    pub fn is_created_by(&self, user_id: i64) -> bool {
        self.created_by == Some(user_id)
    }

    /// Due strictly before `now` and carrying a status outside the terminal set.
    /// No due date, or no status at all, is never overdue.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        let past_due = self.due_date.is_some_and(|d| due_instant(d) < now);
        let open = self
            .status_name
            .as_deref()
            .is_some_and(|name| !ticket_status::is_terminal(name));
        past_due && open
    }
}

/// A due date is compared as midnight UTC of that day.
pub fn due_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
