use bson::{doc, oid::ObjectId, DateTime, Document};
use hostelmate_db::models::{Meal, UserRef};
use mongodb::Database;
use serde::Deserialize;

use super::base::{
    text_search, BaseDao, DaoError, DaoResult, PaginatedResult, PaginationParams, UpdateOutcome,
};

pub const MEAL_SEARCH_FIELDS: [&str; 3] = ["title", "description", "category"];

/// Fields supplied by an admin when creating a meal or an upcoming meal.
#[derive(Debug, Clone, Default)]
pub struct MealDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub price: f64,
    pub rating: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MealPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Likes,
    ReviewCount,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortField {
    fn key(self) -> &'static str {
        match self {
            SortField::Likes => "likes",
            SortField::ReviewCount => "review_count",
        }
    }
}

/// Exact category plus an inclusive price range; `None` means unconstrained.
pub fn meal_filter(category: Option<&str>, min_price: Option<f64>, max_price: Option<f64>) -> Document {
    let mut filter = Document::new();
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        filter.insert("category", category);
    }

    let mut price = Document::new();
    if let Some(min) = min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        filter.insert("price", price);
    }
    filter
}

pub fn sort_doc(field: SortField, order: SortOrder) -> Document {
    let direction = match order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };
    let mut sort = Document::new();
    sort.insert(field.key(), direction);
    sort.insert("_id", direction);
    sort
}

impl MealPatch {
    fn into_set(self) -> Document {
        let mut set = Document::new();
        if let Some(title) = self.title {
            set.insert("title", title);
        }
        if let Some(description) = self.description {
            set.insert("description", description);
        }
        if let Some(category) = self.category {
            set.insert("category", category);
        }
        if let Some(image) = self.image {
            set.insert("image", image);
        }
        if let Some(ingredients) = self.ingredients {
            set.insert("ingredients", ingredients);
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        if let Some(rating) = self.rating {
            set.insert("rating", rating);
        }
        set
    }
}

pub struct MealDao {
    pub base: BaseDao<Meal>,
}

impl MealDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Meal::COLLECTION),
        }
    }

    pub async fn create(&self, draft: MealDraft, distributor: UserRef) -> DaoResult<ObjectId> {
        let meal = Meal {
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

        self.base.insert_one(&meal).await
    }

    pub async fn list_all(&self) -> DaoResult<Vec<Meal>> {
        self.base
            .find_many(doc! {}, Some(doc! { "post_time": -1 }))
            .await
    }

    pub async fn list_page(&self, params: &PaginationParams) -> DaoResult<PaginatedResult<Meal>> {
        self.base
            .find_paginated(doc! {}, Some(doc! { "post_time": -1, "_id": -1 }), params)
            .await
    }

    pub async fn update(&self, id: ObjectId, patch: MealPatch) -> DaoResult<UpdateOutcome> {
        let set = patch.into_set();
        if set.is_empty() {
            return Err(DaoError::Validation("No fields to update".to_string()));
        }
        self.base.update_by_id(id, doc! { "$set": set }).await
    }

    pub async fn search(&self, query: &str) -> DaoResult<Vec<Meal>> {
        self.base
            .find_many(text_search(&MEAL_SEARCH_FIELDS, query), Some(doc! { "post_time": -1 }))
            .await
    }

    pub async fn filter(
        &self,
        category: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> DaoResult<Vec<Meal>> {
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(DaoError::Validation(
                    "minPrice must not exceed maxPrice".to_string(),
                ));
            }
        }
        self.base
            .find_many(
                meal_filter(category, min_price, max_price),
                Some(doc! { "price": 1 }),
            )
            .await
    }

    pub async fn sorted(&self, field: SortField, order: SortOrder) -> DaoResult<Vec<Meal>> {
        self.base.find_many(doc! {}, Some(sort_doc(field, order))).await
    }

    /// Bumps `likes` and records the liker. Repeat likes still count.
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

    pub async fn adjust_review_count(&self, id: ObjectId, delta: i64) -> DaoResult<UpdateOutcome> {
        self.base.increment(id, "review_count", delta).await
    }
}
