use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hostelmate_db::models::{MealRef, Permissions, RequestStatus, RequestedMeal, UserRef};
use hostelmate_services::dao::base::{PaginatedResult, PaginationParams, UpdateOutcome};
use serde::{Deserialize, Serialize};

use super::{DeleteResponse, InsertResponse, parse_oid, rfc3339};
use crate::{
    error::ApiError,
    extractors::{
        auth::AuthUser,
        permission::{require_permission, require_self_or},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub meal_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckQuery {
    pub email: Option<String>,
    pub meal_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub requested: bool,
}

#[derive(Debug, Serialize)]
pub struct RequestedMealResponse {
    pub id: String,
    pub requester: UserRef,
    pub meal: MealRef,
    pub status: RequestStatus,
    pub created_at: String,
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<InsertResponse>), ApiError> {
    let meal_oid = parse_oid(&body.meal_id)?;
    let meal = state.meals.base.find_by_id(meal_oid).await?;

    let id = state
        .requests
        .create(
            auth.to_user_ref(),
            MealRef {
                id: meal_oid.to_hex(),
                title: meal.title,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(InsertResponse::new(id))))
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<PaginatedResult<RequestedMealResponse>>, ApiError> {
    require_permission(&state, &auth, Permissions::SERVE_MEALS).await?;

    let defaults = PaginationParams::default();
    let params = PaginationParams {
        page: query.page.unwrap_or(defaults.page),
        limit: query.limit.unwrap_or(defaults.limit),
    };
    let page = state
        .requests
        .list_page(query.search.as_deref(), &params)
        .await?;
    Ok(Json(page.map(to_response)))
}

/// Whether a student already requested a given meal.
pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CheckQuery>,
) -> Result<Json<CheckResponse>, ApiError> {
    let email = query.email.unwrap_or_else(|| auth.email.clone());
    require_self_or(&state, &auth, &email, Permissions::SERVE_MEALS).await?;

    let requested = state.requests.exists(&email, &query.meal_id).await?;
    Ok(Json(CheckResponse { requested }))
}

pub async fn by_requester(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<RequestedMealResponse>>, ApiError> {
    require_self_or(&state, &auth, &email, Permissions::SERVE_MEALS).await?;
    let requests = state.requests.by_requester(&email).await?;
    Ok(Json(requests.into_iter().map(to_response).collect()))
}

pub async fn deliver(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    require_permission(&state, &auth, Permissions::SERVE_MEALS).await?;
    let oid = parse_oid(&id)?;

    let outcome = state.requests.mark_delivered(oid).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::NotFound("Meal request not found".to_string()));
    }
    Ok(Json(outcome))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let oid = parse_oid(&id)?;

    let request = state.requests.base.find_by_id(oid).await?;
    require_self_or(&state, &auth, &request.requester.email, Permissions::SERVE_MEALS).await?;

    let deleted_count = state.requests.base.delete_by_id(oid).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

fn to_response(r: RequestedMeal) -> RequestedMealResponse {
    RequestedMealResponse {
        id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
        requester: r.requester,
        meal: r.meal,
        status: r.status,
        created_at: rfc3339(r.created_at),
    }
}
