use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub review_count: i64,
    /// Emails of users who liked the meal. Not a guard against repeat likes.
    #[serde(default)]
    pub liked_by: Vec<String>,
    pub distributor: UserRef,
    pub post_time: DateTime,
}

/// A meal staged for student voting before it is published into `meals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingMeal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub liked_by: Vec<String>,
    pub distributor: UserRef,
    pub post_time: DateTime,
}

impl Meal {
    pub const COLLECTION: &'static str = "meals";
}

impl UpcomingMeal {
    pub const COLLECTION: &'static str = "upcoming_meals";
}

impl From<UpcomingMeal> for Meal {
    fn from(upcoming: UpcomingMeal) -> Self {
        Meal {
            id: None,
            title: upcoming.title,
            description: upcoming.description,
            category: upcoming.category,
            image: upcoming.image,
            ingredients: upcoming.ingredients,
            price: upcoming.price,
            rating: upcoming.rating,
            likes: upcoming.likes,
            review_count: upcoming.review_count,
            liked_by: upcoming.liked_by,
            distributor: upcoming.distributor,
            post_time: DateTime::now(),
        }
    }
}
