use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, extractors::auth::TOKEN_COOKIE, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// `POST /jwt`: signs a token for the posted user and sets it as a cookie.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<(HeaderMap, Json<TokenResponse>), ApiError> {
    body.validate()?;

    let issued = state.auth.issue_token(&body.email, body.name)?;

    let mut headers = HeaderMap::new();
    let cookie = token_cookie(&issued.token, issued.expires_in, state.settings.app.production);
    headers.insert(header::SET_COOKIE, header_value(&cookie)?);

    Ok((
        headers,
        Json(TokenResponse {
            token: issued.token,
            expires_in: issued.expires_in,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
) -> Result<(HeaderMap, Json<LogoutResponse>), ApiError> {
    let mut headers = HeaderMap::new();
    let cookie = token_cookie("", 0, state.settings.app.production);
    headers.insert(header::SET_COOKIE, header_value(&cookie)?);
    Ok((headers, Json(LogoutResponse { success: true })))
}

/// Production serves the SPA from another site, so the cookie has to be
/// cross-site (`Secure; SameSite=None`).
pub(crate) fn token_cookie(token: &str, max_age: u64, production: bool) -> String {
    let site = if production {
        "Secure; SameSite=None"
    } else {
        "SameSite=Strict"
    };
    format!("{TOKEN_COOKIE}={token}; HttpOnly; Path=/; Max-Age={max_age}; {site}")
}

fn header_value(cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {e}")))
}
