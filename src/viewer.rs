use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::entities::user;
use crate::error::AppError;
use crate::AppState;

/// Header the upstream auth proxy sets to the logged-in username.
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// The authenticated user making the request.
///
/// Handlers that take a `Viewer` reject anonymous requests with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer(pub user::Model);

impl Viewer {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(REMOTE_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("login required".to_string()))?
            .to_string();

        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username.as_str()))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "rejecting unknown viewer");
                AppError::Unauthorized(format!("unknown user {}", username))
            })?;

        Ok(Viewer(user))
    }
}
