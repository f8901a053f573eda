use bson::{doc, oid::ObjectId, DateTime};
use hostelmate_db::models::{Meal, UpcomingMeal, UserRef};
use mongodb::Database;
use tracing::{error, info};

use super::base::{BaseDao, DaoError, DaoResult, PaginatedResult, PaginationParams, UpdateOutcome};
use super::meal::{MealDao, MealDraft};

pub struct UpcomingMealDao {
    pub base: BaseDao<UpcomingMeal>,
}

impl UpcomingMealDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, UpcomingMeal::COLLECTION),
        }
    }

    pub async fn create(&self, draft: MealDraft, distributor: UserRef) -> DaoResult<ObjectId> {
        let upcoming = UpcomingMeal {
            id: None,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            image: draft.image,
            ingredients: draft.ingredients,
            price: draft.price,
            rating: draft.rating,
            likes: 0,
            review_count: 0,
            liked_by: Vec::new(),
            distributor,
            post_time: DateTime::now(),
        };

        self.base.insert_one(&upcoming).await
    }

    /// Most liked first.
    pub async fn list_page(
        &self,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<UpcomingMeal>> {
        self.base
            .find_paginated(doc! {}, Some(doc! { "likes": -1, "_id": -1 }), params)
            .await
    }

    pub async fn like(&self, id: ObjectId, email: &str) -> DaoResult<UpdateOutcome> {
        self.base
            .update_by_id(
                id,
                doc! {
                    "$inc": { "likes": 1 },
                    "$addToSet": { "liked_by": email },
                },
            )
            .await
    }

    /// Copies the upcoming meal into `meals`, then removes the original.
    /// If the removal fails the copy is deleted again.
    pub async fn publish(&self, meals: &MealDao, id: ObjectId) -> DaoResult<ObjectId> {
        let upcoming = self.base.find_by_id(id).await?;
        let meal = Meal::from(upcoming);
        let meal_id = meals.base.insert_one(&meal).await?;

        match self.base.delete_by_id(id).await {
            Ok(1) => {
                info!(upcoming_id = %id, meal_id = %meal_id, "Upcoming meal published");
                Ok(meal_id)
            }
            Ok(_) => {
                // Someone else published or removed it between our read and delete.
                compensate_publish(meals, meal_id).await;
                Err(DaoError::NotFound)
            }
            Err(e) => {
                compensate_publish(meals, meal_id).await;
                Err(e)
            }
        }
    }
}

async fn compensate_publish(meals: &MealDao, meal_id: ObjectId) {
    if let Err(e) = meals.base.delete_by_id(meal_id).await {
        error!(meal_id = %meal_id, error = %e, "Failed to roll back published meal copy");
    }
}
