use actix_session::Session;

use crate::errors::AppError;

/// Permission codes held by the logged-in user, stored in the session as CSV.
#[derive(Debug, Clone, Default)]
pub struct Permissions(pub Vec<String>);

impl Permissions {
    pub fn has(&self, code: &str) -> bool {
        self.0.iter().any(|p| p == code)
    }

    pub fn from_csv(csv: &str) -> Self {
        let codes = csv
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Permissions(codes)
    }

    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, AppError> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err(AppError::Session("No username in session".to_string())),
        Err(e) => Err(AppError::Session(e.to_string())),
    }
}

/// Missing permissions read as an empty set.
pub fn get_permissions(session: &Session) -> Result<Permissions, AppError> {
    match session.get::<String>("permissions") {
        Ok(Some(csv)) => Ok(Permissions::from_csv(&csv)),
        Ok(None) => Ok(Permissions::default()),
        Err(e) => Err(AppError::Session(e.to_string())),
    }
}

/// Store the identity of a freshly authenticated user.
pub fn sign_in(
    session: &Session,
    user_id: i64,
    username: &str,
    permissions: &Permissions,
) -> Result<(), AppError> {
    session.renew();
    session
        .insert("user_id", user_id)
        .and_then(|_| session.insert("username", username))
        .and_then(|_| session.insert("permissions", permissions.to_csv()))
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn require_permission(session: &Session, code: &str) -> Result<(), AppError> {
    if get_permissions(session)?.has(code) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_round_trip_skips_blanks() {
        let perms = Permissions::from_csv(" dashboard.stats, ,users.list,");
        assert!(perms.has("dashboard.stats"));
        assert!(perms.has("users.list"));
        assert!(!perms.has(""));
        assert_eq!(perms.to_csv(), "dashboard.stats,users.list");
    }
}
