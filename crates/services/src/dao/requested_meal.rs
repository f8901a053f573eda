use bson::{doc, oid::ObjectId, DateTime};
use hostelmate_db::models::{MealRef, RequestStatus, RequestedMeal, UserRef};
use mongodb::Database;

use super::base::{text_search, BaseDao, DaoResult, PaginatedResult, PaginationParams, UpdateOutcome};

pub const REQUEST_SEARCH_FIELDS: [&str; 2] = ["requester.name", "requester.email"];

pub struct RequestedMealDao {
    pub base: BaseDao<RequestedMeal>,
}

impl RequestedMealDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, RequestedMeal::COLLECTION),
        }
    }

    pub async fn create(&self, requester: UserRef, meal: MealRef) -> DaoResult<ObjectId> {
        let request = RequestedMeal {
            id: None,
            requester,
            meal,
            status: RequestStatus::Requested,
            created_at: DateTime::now(),
        };
        self.base.insert_one(&request).await
    }

    pub async fn exists(&self, email: &str, meal_id: &str) -> DaoResult<bool> {
        let count = self
            .base
            .count(doc! { "requester.email": email, "meal.id": meal_id })
            .await?;
        Ok(count > 0)
    }

    pub async fn by_requester(&self, email: &str) -> DaoResult<Vec<RequestedMeal>> {
        self.base
            .find_many(doc! { "requester.email": email }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn list_page(
        &self,
        search: Option<&str>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<RequestedMeal>> {
        let filter = match search.filter(|s| !s.is_empty()) {
            Some(query) => text_search(&REQUEST_SEARCH_FIELDS, query),
            None => doc! {},
        };
        self.base
            .find_paginated(filter, Some(doc! { "created_at": -1, "_id": -1 }), params)
            .await
    }

    pub async fn mark_delivered(&self, id: ObjectId) -> DaoResult<UpdateOutcome> {
        self.base
            .update_by_id(
                id,
                doc! { "$set": { "status": bson::to_bson(&RequestStatus::Delivered)? } },
            )
            .await
    }
}
