//! Stats overview against Postgres. Skipped when `DATABASE_URL` is unset.

mod common;

use common::*;
use sqlx::PgPool;
use ticketdesk::models::ticket::{self, NewTicket};
use ticketdesk::models::user::{self, NewUser};
use ticketdesk::models::{project, ticket_status};
use ticketdesk::stats::{self, Snapshot, StatColor, StatsContext};

async fn create_user(pool: &PgPool, name: &str) -> i64 {
    user::create(
        pool,
        &NewUser {
            username: name.to_string(),
            password: "not-a-real-hash".to_string(),
            email: format!("{name}@test.com"),
            display_name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

async fn status(pool: &PgPool, name: &str) -> i64 {
    ticket_status::ensure(pool, name, 0).await.unwrap()
}

async fn create_ticket(
    pool: &PgPool,
    project_id: i64,
    status_id: Option<i64>,
    created_by: Option<i64>,
    created_days_ago: i64,
    due_days_ago: Option<i64>,
) -> i64 {
    ticket::create(
        pool,
        &NewTicket {
            project_id,
            title: "Test ticket".to_string(),
            status_id,
            created_by,
            due_date: due_days_ago.map(date_days_ago),
            created_at: Some(days_ago(created_days_ago)),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_pg_empty_ticket_scenario() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();

    for i in 0..10 {
        project::create(pool, &format!("Project {i}")).await.unwrap();
    }
    let viewer = create_user(pool, "viewer").await;

    let overview = stats::collect(pool, &StatsContext::new(Some(viewer), fixed_now()))
        .await
        .unwrap();
    let values: Vec<i64> = overview.cards().iter().map(|c| c.value).collect();
    assert_eq!(values, vec![10, 0, 0, 0, 0, 0, 0, 1]);

    db.teardown().await;
}

#[tokio::test]
async fn test_pg_single_ticket_scenario() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();

    let project_id = project::create(pool, "Support").await.unwrap();
    let viewer = create_user(pool, "viewer").await;
    let open = status(pool, "Open").await;
    create_ticket(pool, project_id, Some(open), Some(viewer), 2, Some(1)).await;

    let overview = stats::collect(pool, &StatsContext::new(Some(viewer), fixed_now()))
        .await
        .unwrap();
    assert_eq!(overview.total_tickets, 1);
    assert_eq!(overview.new_tickets_this_week, 1);
    assert_eq!(overview.unassigned_tickets, 1);
    assert_eq!(overview.my_created_tickets, 1);
    assert_eq!(overview.my_assigned_tickets, 0);
    assert_eq!(overview.overdue_tickets, 1);
    assert_eq!(overview.cards()[4].color, StatColor::Danger);
    assert_eq!(overview.cards()[6].color, StatColor::Danger);

    db.teardown().await;
}

#[tokio::test]
async fn test_pg_overdue_and_assignment_filters() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();

    let project_id = project::create(pool, "Support").await.unwrap();
    let viewer = create_user(pool, "viewer").await;
    let other = create_user(pool, "other").await;
    let open = status(pool, "Open").await;
    let done = status(pool, "Done").await;
    let closed = status(pool, "Closed").await;
    let lower = status(pool, "closed").await;

    // Overdue: open + past due.
    let t1 = create_ticket(pool, project_id, Some(open), Some(other), 20, Some(3)).await;
    // Not overdue: terminal statuses, missing status, missing or future due date.
    create_ticket(pool, project_id, Some(done), Some(other), 20, Some(3)).await;
    create_ticket(pool, project_id, Some(closed), Some(viewer), 20, Some(3)).await;
    create_ticket(pool, project_id, None, Some(viewer), 20, Some(3)).await;
    create_ticket(pool, project_id, Some(open), None, 20, None).await;
    let t6 = create_ticket(pool, project_id, Some(open), None, 1, Some(-4)).await;
    // Lower-case "closed" is not terminal.
    create_ticket(pool, project_id, Some(lower), None, 1, Some(2)).await;

    ticket::assign(pool, t1, viewer).await.unwrap();
    ticket::assign(pool, t1, other).await.unwrap();
    ticket::assign(pool, t1, other).await.unwrap();
    ticket::assign(pool, t6, other).await.unwrap();

    let ctx = StatsContext::new(Some(viewer), fixed_now());
    let overview = stats::collect(pool, &ctx).await.unwrap();
    assert_eq!(overview.total_tickets, 7);
    assert_eq!(overview.overdue_tickets, 2);
    assert_eq!(overview.unassigned_tickets, 5);
    assert_eq!(overview.my_assigned_tickets, 1);
    assert_eq!(overview.my_created_tickets, 2);
    assert_eq!(overview.new_tickets_this_week, 2);

    let anonymous = stats::collect(pool, &StatsContext::new(None, fixed_now())).await.unwrap();
    assert_eq!(anonymous.my_assigned_tickets, 0);
    assert_eq!(anonymous.my_created_tickets, 0);

    db.teardown().await;
}

#[tokio::test]
async fn test_pg_matches_in_memory_snapshot() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();

    let project_id = project::create(pool, "Mixed").await.unwrap();
    let viewer = create_user(pool, "viewer").await;
    let other = create_user(pool, "other").await;
    let names = ["Open", "Done", "Completed", "In Progress"];
    let mut status_ids = Vec::new();
    for name in names {
        status_ids.push(status(pool, name).await);
    }

    for i in 0..20_i64 {
        let status_id = if i % 5 == 4 { None } else { status_ids.get((i % 4) as usize).copied() };
        let creator = if i % 2 == 0 { Some(viewer) } else { Some(other) };
        let due = match i % 3 {
            0 => None,
            1 => Some(i % 7),
            _ => Some(-(i % 5)),
        };
        let id = create_ticket(pool, project_id, status_id, creator, i, due).await;
        if i % 3 == 1 {
            ticket::assign(pool, id, viewer).await.unwrap();
        }
        if i % 4 == 2 {
            ticket::assign(pool, id, other).await.unwrap();
        }
    }

    let snapshot = Snapshot::load(pool).await.unwrap();
    assert_eq!(snapshot.tickets.len(), 20);

    for viewer_id in [Some(viewer), Some(other), None] {
        for offset_days in [0, 3, 8] {
            let ctx = StatsContext::new(viewer_id, days_ago(offset_days));
            let from_db = stats::collect(pool, &ctx).await.unwrap();
            let from_memory = stats::collect(&snapshot, &ctx).await.unwrap();
            assert_eq!(from_db, from_memory, "viewer {viewer_id:?}, {offset_days} days back");
        }
    }

    db.teardown().await;
}
