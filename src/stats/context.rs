use chrono::{DateTime, Duration, Utc};

/// Tickets created within this many days count as new.
pub const NEW_TICKET_WINDOW_DAYS: i64 = 7;

/// Who is looking and when. `now` is captured once so every counter sees the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsContext {
    pub viewer_id: Option<i64>,
    pub now: DateTime<Utc>,
}

impl StatsContext {
    pub fn new(viewer_id: Option<i64>, now: DateTime<Utc>) -> Self {
        Self { viewer_id, now }
    }

    /// Context for the current wall-clock instant.
    pub fn at_now(viewer_id: Option<i64>) -> Self {
        Self::new(viewer_id, Utc::now())
    }

    /// Earliest creation time still counted as "new this week" (inclusive).
    pub fn new_ticket_cutoff(&self) -> DateTime<Utc> {
        self.now - Duration::days(NEW_TICKET_WINDOW_DAYS)
    }
}
