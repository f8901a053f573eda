use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use hostelmate_db::models::UserRef;
use hostelmate_services::auth::Claims;

use crate::{error::ApiError, state::AppState};

pub const TOKEN_COOKIE: &str = "token";

/// Extracts the authenticated caller from JWT (Authorization header or cookie)
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub name: Option<String>,
    pub claims: Claims,
}

impl AuthUser {
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let claims = app_state.auth.verify_token(&token)?;

        Ok(AuthUser {
            email: claims.email.clone(),
            name: claims.name.clone(),
            claims,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            cookie
                .trim()
                .strip_prefix(TOKEN_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|s| s.to_string())
        })
        .filter(|s| !s.is_empty())
}
