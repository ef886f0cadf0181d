use sqlx::PgPool;

use super::types::{NewTicket, TicketRecord};

pub async fn create(pool: &PgPool, ticket: &NewTicket) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO tickets (project_id, title, status_id, created_by, due_date, created_at) \
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW())) RETURNING id",
    )
    .bind(ticket.project_id)
    .bind(&ticket.title)
    .bind(ticket.status_id)
    .bind(ticket.created_by)
    .bind(ticket.due_date)
    .bind(ticket.created_at)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Add a user to the ticket's assignees. Assigning twice is a no-op.
pub async fn assign(pool: &PgPool, ticket_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO ticket_assignees (ticket_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(ticket_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Load every ticket with its status name and assignee ids.
pub async fn find_all_records(pool: &PgPool) -> Result<Vec<TicketRecord>, sqlx::Error> {
    sqlx::query_as::<_, TicketRecord>(
        "SELECT t.id, t.created_at, t.due_date, t.created_by, \
                s.name AS status_name, \
                COALESCE(array_agg(a.user_id ORDER BY a.user_id) \
                    FILTER (WHERE a.user_id IS NOT NULL), '{}') AS assignee_ids \
         FROM tickets t \
         LEFT JOIN ticket_statuses s ON s.id = t.status_id \
         LEFT JOIN ticket_assignees a ON a.ticket_id = t.id \
         GROUP BY t.id, s.name \
         ORDER BY t.id",
    )
    .fetch_all(pool)
    .await
}
