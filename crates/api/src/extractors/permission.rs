use hostelmate_db::models::{Permissions, User};
use hostelmate_services::dao::base::DaoError;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

/// Loads the caller's user record and checks that its role grants `permission`.
pub async fn require_permission(
    state: &AppState,
    auth: &AuthUser,
    permission: Permissions,
) -> Result<User, ApiError> {
    let user = state
        .users
        .find_by_email(&auth.email)
        .await
        .map_err(|e| match e {
            DaoError::NotFound => ApiError::Forbidden("Unknown user".to_string()),
            other => other.into(),
        })?;

    if !user.role.can(permission) {
        return Err(ApiError::Forbidden(format!(
            "Missing permission: {}",
            permission_names(permission)
        )));
    }
    Ok(user)
}

/// Passes when the caller owns `email`, otherwise requires `permission`.
pub async fn require_self_or(
    state: &AppState,
    auth: &AuthUser,
    email: &str,
    permission: Permissions,
) -> Result<(), ApiError> {
    if auth.email == email {
        return Ok(());
    }
    require_permission(state, auth, permission).await.map(|_| ())
}

fn permission_names(permission: Permissions) -> String {
    permission
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}
