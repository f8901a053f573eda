use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hostelmate_db::models::{Meal, Permissions, UpcomingMeal, UserRef};
use hostelmate_services::dao::base::{PaginatedResult, PaginationParams, UpdateOutcome};
use hostelmate_services::dao::meal::{MealDraft, MealPatch, SortField, SortOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{DeleteResponse, InsertResponse, SearchRequest, parse_oid, rfc3339};
use crate::{
    error::ApiError,
    extractors::{auth::AuthUser, permission::require_permission},
    state::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMealRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    /// Defaults to the admin creating the meal.
    pub distributor: Option<UserRef>,
}

impl CreateMealRequest {
    pub fn into_parts(self) -> (MealDraft, Option<UserRef>) {
        (
            MealDraft {
                title: self.title,
                description: self.description,
                category: self.category,
                image: self.image,
                ingredients: self.ingredients,
                price: self.price,
                rating: self.rating,
            },
            self.distributor,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMealRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    pub sort_by: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub price: f64,
    pub rating: f64,
    pub likes: i64,
    pub review_count: i64,
    pub liked_by: Vec<String>,
    pub distributor: UserRef,
    pub post_time: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MealListing {
    Page(PaginatedResult<MealResponse>),
    All(Vec<MealResponse>),
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MealListing>, ApiError> {
    if query.page.is_none() && query.limit.is_none() {
        let meals = state.meals.list_all().await?;
        return Ok(Json(MealListing::All(meals.into_iter().map(to_response).collect())));
    }

    let defaults = PaginationParams::default();
    let params = PaginationParams {
        page: query.page.unwrap_or(defaults.page),
        limit: query.limit.unwrap_or(defaults.limit),
    };
    let page = state.meals.list_page(&params).await?;
    Ok(Json(MealListing::Page(page.map(to_response))))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<InsertResponse>), ApiError> {
    let admin = require_permission(&state, &auth, Permissions::MANAGE_MEALS).await?;
    body.validate()?;

    let (draft, distributor) = body.into_parts();
    let id = state
        .meals
        .create(draft, distributor.unwrap_or_else(|| admin.to_ref()))
        .await?;

    Ok((StatusCode::CREATED, Json(InsertResponse::new(id))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealResponse>, ApiError> {
    let oid = parse_oid(&id)?;
    let meal = state.meals.base.find_by_id(oid).await?;
    Ok(Json(to_response(meal)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateMealRequest>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_MEALS).await?;
    body.validate()?;
    let oid = parse_oid(&id)?;

    let patch = MealPatch {
        title: body.title,
        description: body.description,
        category: body.category,
        image: body.image,
        ingredients: body.ingredients,
        price: body.price,
        rating: body.rating,
    };
    let outcome = state.meals.update(oid, patch).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::NotFound("Meal not found".to_string()));
    }
    Ok(Json(outcome))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    require_permission(&state, &auth, Permissions::MANAGE_MEALS).await?;
    let oid = parse_oid(&id)?;

    let deleted_count = state.meals.base.delete_by_id(oid).await?;
    if deleted_count == 0 {
        return Err(ApiError::NotFound("Meal not found".to_string()));
    }
    Ok(Json(DeleteResponse { deleted_count }))
}

pub async fn like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let oid = parse_oid(&id)?;
    let outcome = state.meals.like(oid, &auth.email).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::NotFound("Meal not found".to_string()));
    }
    Ok(Json(outcome))
}

pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<Vec<MealResponse>>, ApiError> {
    body.validate()?;
    let meals = state.meals.search(&body.search).await?;
    Ok(Json(meals.into_iter().map(to_response).collect()))
}

pub async fn filter(
    State(state): State<AppState>,
    Json(body): Json<FilterRequest>,
) -> Result<Json<Vec<MealResponse>>, ApiError> {
    let meals = state
        .meals
        .filter(body.category.as_deref(), body.min_price, body.max_price)
        .await?;
    Ok(Json(meals.into_iter().map(to_response).collect()))
}

pub async fn sort(
    State(state): State<AppState>,
    Json(body): Json<SortRequest>,
) -> Result<Json<Vec<MealResponse>>, ApiError> {
    let meals = state.meals.sorted(body.sort_by, body.order).await?;
    Ok(Json(meals.into_iter().map(to_response).collect()))
}

pub fn to_response(m: Meal) -> MealResponse {
    MealResponse {
        id: m.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: m.title,
        description: m.description,
        category: m.category,
        image: m.image,
        ingredients: m.ingredients,
        price: m.price,
        rating: m.rating,
        likes: m.likes,
        review_count: m.review_count,
        liked_by: m.liked_by,
        distributor: m.distributor,
        post_time: rfc3339(m.post_time),
    }
}

pub fn upcoming_to_response(m: UpcomingMeal) -> MealResponse {
    MealResponse {
        id: m.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: m.title,
        description: m.description,
        category: m.category,
        image: m.image,
        ingredients: m.ingredients,
        price: m.price,
        rating: m.rating,
        likes: m.likes,
        review_count: m.review_count,
        liked_by: m.liked_by,
        distributor: m.distributor,
        post_time: rfc3339(m.post_time),
    }
}
