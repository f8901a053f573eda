use bson::{doc, oid::ObjectId, DateTime, Document};
use hostelmate_db::models::{Review, UserRef};
use mongodb::Database;
use tracing::{error, warn};

use super::base::{
    text_search, BaseDao, DaoError, DaoResult, PaginatedResult, PaginationParams, UpdateOutcome,
};
use super::meal::MealDao;

pub const REVIEW_SEARCH_FIELDS: [&str; 2] = ["reviewer.name", "reviewer.email"];

pub struct ReviewDao {
    pub base: BaseDao<Review>,
}

impl ReviewDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Review::COLLECTION),
        }
    }

    /// Stores the review and bumps the meal's `review_count`. The review is
    /// removed again when the counter update fails.
    pub async fn create(
        &self,
        meals: &MealDao,
        meal_id: ObjectId,
        review: String,
        rating: f64,
        reviewer: UserRef,
    ) -> DaoResult<ObjectId> {
        let meal = meals.base.find_by_id(meal_id).await?;

        let doc = Review {
            id: None,
            meal_id: meal_id.to_hex(),
            meal_title: Some(meal.title),
            review,
            rating,
            reviewer,
            likes: 0,
            created_at: DateTime::now(),
        };
        let review_id = self.base.insert_one(&doc).await?;

        let outcome = meals.adjust_review_count(meal_id, 1).await;
        match outcome {
            Ok(o) if o.matched_count == 1 => Ok(review_id),
            Ok(_) => {
                self.compensate_create(review_id).await;
                Err(DaoError::NotFound)
            }
            Err(e) => {
                self.compensate_create(review_id).await;
                Err(e)
            }
        }
    }

    async fn compensate_create(&self, review_id: ObjectId) {
        if let Err(e) = self.base.delete_by_id(review_id).await {
            error!(review_id = %review_id, error = %e, "Failed to roll back review insert");
        }
    }

    /// Removes the review, then decrements the meal's `review_count`. Only
    /// the caller whose delete actually removed the document touches the
    /// counter, so racing deletes count once. The review is put back when the
    /// decrement fails.
    pub async fn delete(&self, meals: &MealDao, review_id: ObjectId) -> DaoResult<u64> {
        let review = self
            .base
            .collection()
            .find_one_and_delete(doc! { "_id": review_id })
            .await?
            .ok_or(DaoError::NotFound)?;

        // Reviews can outlive their meal; there is nothing to decrement then.
        let Ok(meal_id) = ObjectId::parse_str(&review.meal_id) else {
            return Ok(1);
        };

        match meals.adjust_review_count(meal_id, -1).await {
            Ok(outcome) => {
                if outcome.matched_count == 0 {
                    warn!(review_id = %review_id, meal_id = %meal_id, "Review references a missing meal");
                }
                Ok(1)
            }
            Err(e) => {
                if let Err(restore) = self.base.collection().insert_one(&review).await {
                    error!(
                        review_id = %review_id,
                        error = %restore,
                        "Failed to restore review after failed review_count update"
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn for_meal(&self, meal_id: &str) -> DaoResult<Vec<Review>> {
        self.base
            .find_many(doc! { "mealId": meal_id }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn by_reviewer(&self, email: &str) -> DaoResult<Vec<Review>> {
        self.base
            .find_many(doc! { "reviewer.email": email }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn list_page(&self, params: &PaginationParams) -> DaoResult<PaginatedResult<Review>> {
        self.base
            .find_paginated(doc! {}, Some(doc! { "created_at": -1, "_id": -1 }), params)
            .await
    }

    pub async fn search(&self, query: &str) -> DaoResult<Vec<Review>> {
        self.base
            .find_many(
                text_search(&REVIEW_SEARCH_FIELDS, query),
                Some(doc! { "created_at": -1 }),
            )
            .await
    }

    pub async fn update(
        &self,
        review_id: ObjectId,
        review: Option<String>,
        rating: Option<f64>,
    ) -> DaoResult<UpdateOutcome> {
        let mut set = Document::new();
        if let Some(text) = review {
            set.insert("review", text);
        }
        if let Some(rating) = rating {
            set.insert("rating", rating);
        }
        if set.is_empty() {
            return Err(DaoError::Validation("No fields to update".to_string()));
        }
        self.base.update_by_id(review_id, doc! { "$set": set }).await
    }
}
