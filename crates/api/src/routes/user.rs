use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hostelmate_db::models::{Permissions, Role, User};
use hostelmate_services::dao::base::{PaginatedResult, PaginationParams, UpdateOutcome};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{SearchRequest, rfc3339};
use crate::{
    error::ApiError,
    extractors::{
        auth::AuthUser,
        permission::{require_permission, require_self_or},
    },
    state::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub message: String,
    pub inserted_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MakeAdminRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub photo: Option<String>,
    pub role: Role,
    pub badge: String,
    pub created_at: String,
}

/// Creates the account on first sign-in. An existing email is not an error.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    body.validate()?;

    let inserted = state
        .users
        .create_if_absent(body.email, body.name, body.photo)
        .await?;

    Ok(match inserted {
        Some(id) => (
            StatusCode::CREATED,
            Json(CreateUserResponse {
                message: "user created".to_string(),
                inserted_id: Some(id.to_hex()),
            }),
        ),
        None => (
            StatusCode::OK,
            Json(CreateUserResponse {
                message: "user already exists".to_string(),
                inserted_id: None,
            }),
        ),
    })
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResult<UserResponse>>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_USERS).await?;
    let page = state.users.list_page(&params).await?;
    Ok(Json(page.map(to_response)))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    require_self_or(&state, &auth, &email, Permissions::MANAGE_USERS).await?;
    let user = state.users.find_by_email(&email).await?;
    Ok(Json(to_response(user)))
}

pub async fn is_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>, ApiError> {
    if auth.email != email {
        return Err(ApiError::Forbidden("Forbidden access".to_string()));
    }

    let admin = state
        .users
        .base
        .find_one(bson::doc! { "email": &email })
        .await?
        .is_some_and(|u| u.role == Role::Admin);

    Ok(Json(AdminCheckResponse { admin }))
}

pub async fn make_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<MakeAdminRequest>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_USERS).await?;
    body.validate()?;

    let outcome = state.users.set_role(&body.email, Role::Admin).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(Json(outcome))
}

pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SearchRequest>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_USERS).await?;
    body.validate()?;
    let users = state.users.search(&body.search).await?;
    Ok(Json(users.into_iter().map(to_response).collect()))
}

fn to_response(u: User) -> UserResponse {
    UserResponse {
        id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
        email: u.email,
        name: u.name,
        photo: u.photo,
        role: u.role,
        badge: u.badge,
        created_at: rfc3339(u.created_at),
    }
}
