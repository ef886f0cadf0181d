//! Stats overview for the dashboard: eight ticketing counters rendered as cards.
//!
//! The counters are computed against a [`StatsSource`] for an explicit
//! [`StatsContext`] (viewer + evaluation instant), so the same inputs always
//! produce the same cards.

mod cards;
mod context;
mod snapshot;
mod source;

pub use cards::{StatCard, StatColor, StatsOverview, attention_color};
pub use context::StatsContext;
pub use snapshot::Snapshot;
pub use source::StatsSource;

/// Run every counter for `ctx` and gather the results.
///
/// The queries are independent and are awaited concurrently. Counters that
/// depend on the viewer are zero, and never queried, when nobody is signed in.
/// The first failing query aborts the whole collection.
pub async fn collect<S: StatsSource>(source: &S, ctx: &StatsContext) -> Result<StatsOverview, sqlx::Error> {
    let cutoff = ctx.new_ticket_cutoff();
    let viewer = ctx.viewer_id;

    let (
        total_projects,
        total_tickets,
        new_tickets_this_week,
        team_members,
        unassigned_tickets,
        my_assigned_tickets,
        my_created_tickets,
        overdue_tickets,
    ) = tokio::try_join!(
        source.count_projects(),
        source.count_tickets(),
        source.count_tickets_created_since(cutoff),
        source.count_users(),
        source.count_unassigned_tickets(),
        async {
            match viewer {
                Some(user_id) => source.count_tickets_assigned_to(user_id).await,
                None => Ok(0),
            }
        },
        async {
            match viewer {
                Some(user_id) => source.count_tickets_created_by(user_id).await,
                None => Ok(0),
            }
        },
        source.count_overdue_tickets(ctx.now),
    )?;

    Ok(StatsOverview {
        total_projects,
        total_tickets,
        my_assigned_tickets,
        new_tickets_this_week,
        unassigned_tickets,
        my_created_tickets,
        overdue_tickets,
        team_members,
    })
}

/// Collect and turn the result straight into display cards.
pub async fn compute_cards<S: StatsSource>(source: &S, ctx: &StatsContext) -> Result<Vec<StatCard>, sqlx::Error> {
    let overview = collect(source, ctx).await?;
    log::debug!(
        "Stats computed for viewer {:?} at {}: {:?}",
        ctx.viewer_id,
        ctx.now,
        overview
    );
    Ok(overview.cards())
}
