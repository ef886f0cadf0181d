mod common;
mod dashboard;

pub use common::*;
pub use dashboard::*;

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{Permissions, get_permissions, get_username};
use crate::errors::AppError;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.app_name`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub permissions: Permissions,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str) -> Result<Self, AppError> {
        let username = get_username(session)?;
        let permissions = get_permissions(session)?;
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            username,
            avatar_initial,
            permissions,
            app_name: app_name.to_string(),
            csrf_token,
        })
    }
}
