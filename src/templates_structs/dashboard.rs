use askama::Template;

use super::PageContext;
use crate::stats::StatCard;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    /// `None` when the viewer may not see the stats widget.
    pub stats: Option<Vec<StatCard>>,
    pub poll_seconds: u64,
}
