use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hostelmate_db::models::Permissions;
use hostelmate_services::dao::base::{PaginatedResult, PaginationParams, UpdateOutcome};
use validator::Validate;

use super::meal::{CreateMealRequest, MealResponse, upcoming_to_response};
use super::{InsertResponse, parse_oid};
use crate::{
    error::ApiError,
    extractors::{auth::AuthUser, permission::require_permission},
    state::AppState,
};

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<InsertResponse>), ApiError> {
    let admin = require_permission(&state, &auth, Permissions::MANAGE_MEALS).await?;
    body.validate()?;

    let (draft, distributor) = body.into_parts();
    let id = state
        .upcoming
        .create(draft, distributor.unwrap_or_else(|| admin.to_ref()))
        .await?;

    Ok((StatusCode::CREATED, Json(InsertResponse::new(id))))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResult<MealResponse>>, ApiError> {
    let page = state.upcoming.list_page(&params).await?;
    Ok(Json(page.map(upcoming_to_response)))
}

/// Moves an upcoming meal into the regular menu.
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<InsertResponse>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_MEALS).await?;
    let oid = parse_oid(&id)?;

    let meal_id = state
        .upcoming
        .publish(&state.meals, oid)
        .await
        .map_err(|e| match e {
            hostelmate_services::dao::base::DaoError::NotFound => {
                ApiError::NotFound("Upcoming meal not found".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(InsertResponse::new(meal_id)))
}

pub async fn like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let oid = parse_oid(&id)?;
    let outcome = state.upcoming.like(oid, &auth.email).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::NotFound("Upcoming meal not found".to_string()));
    }
    Ok(Json(outcome))
}
