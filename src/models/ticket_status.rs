use sqlx::PgPool;

/// Status names that close a ticket. Matching is exact and case-sensitive.
pub const TERMINAL_STATUSES: [&str; 3] = ["Completed", "Done", "Closed"];

/// Statuses seeded on a fresh database, in display order.
pub const DEFAULT_STATUSES: [&str; 6] = ["Open", "In Progress", "Review", "Done", "Completed", "Closed"];

pub fn is_terminal(name: &str) -> bool {
    TERMINAL_STATUSES.contains(&name)
}

pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM ticket_statuses WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id,)| id))
}

/// Insert the status if missing; returns its id either way.
pub async fn ensure(pool: &PgPool, name: &str, sort_order: i32) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO ticket_statuses (name, sort_order) VALUES ($1, $2) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(name)
    .bind(sort_order)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_match_is_case_sensitive() {
        assert!(is_terminal("Done"));
        assert!(is_terminal("Closed"));
        assert!(is_terminal("Completed"));
        assert!(!is_terminal("done"));
        assert!(!is_terminal("CLOSED"));
        assert!(!is_terminal("Open"));
        assert!(!is_terminal("Done "));
    }
}
