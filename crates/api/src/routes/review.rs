use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hostelmate_db::models::{Permissions, Review, UserRef};
use hostelmate_services::dao::base::{PaginatedResult, PaginationParams, UpdateOutcome};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{DeleteResponse, InsertResponse, SearchRequest, parse_oid, rfc3339};
use crate::{
    error::ApiError,
    extractors::{
        auth::AuthUser,
        permission::{require_permission, require_self_or},
    },
    state::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(rename = "mealId")]
    pub meal_id: String,
    #[validate(length(min = 1, message = "review must not be empty"))]
    pub review: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1))]
    pub review: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    #[serde(rename = "mealId")]
    pub meal_id: String,
    pub meal_title: Option<String>,
    pub review: String,
    pub rating: f64,
    pub reviewer: UserRef,
    pub likes: i64,
    pub created_at: String,
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<InsertResponse>), ApiError> {
    body.validate()?;
    let meal_id = parse_oid(&body.meal_id)?;

    let id = state
        .reviews
        .create(
            &state.meals,
            meal_id,
            body.review,
            body.rating,
            auth.to_user_ref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(InsertResponse::new(id))))
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResult<ReviewResponse>>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_REVIEWS).await?;
    let page = state.reviews.list_page(&params).await?;
    Ok(Json(page.map(to_response)))
}

/// Reviews of one meal, newest first.
pub async fn for_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.reviews.for_meal(&meal_id).await?;
    Ok(Json(reviews.into_iter().map(to_response).collect()))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    body.validate()?;
    let oid = parse_oid(&id)?;

    let review = state.reviews.base.find_by_id(oid).await?;
    if review.reviewer.email != auth.email {
        return Err(ApiError::Forbidden("Only the author can edit a review".to_string()));
    }

    let outcome = state.reviews.update(oid, body.review, body.rating).await?;
    Ok(Json(outcome))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let oid = parse_oid(&id)?;

    let review = state.reviews.base.find_by_id(oid).await?;
    require_self_or(&state, &auth, &review.reviewer.email, Permissions::MANAGE_REVIEWS).await?;

    let deleted_count = state.reviews.delete(&state.meals, oid).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

pub async fn by_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    require_self_or(&state, &auth, &email, Permissions::MANAGE_REVIEWS).await?;
    let reviews = state.reviews.by_reviewer(&email).await?;
    Ok(Json(reviews.into_iter().map(to_response).collect()))
}

pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SearchRequest>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_REVIEWS).await?;
    body.validate()?;
    let reviews = state.reviews.search(&body.search).await?;
    Ok(Json(reviews.into_iter().map(to_response).collect()))
}

fn to_response(r: Review) -> ReviewResponse {
    ReviewResponse {
        id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
        meal_id: r.meal_id,
        meal_title: r.meal_title,
        review: r.review,
        rating: r.rating,
        reviewer: r.reviewer,
        likes: r.likes,
        created_at: rfc3339(r.created_at),
    }
}
