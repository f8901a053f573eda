use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Hex id of the reviewed meal, kept as a string.
    #[serde(rename = "mealId")]
    pub meal_id: String,
    pub meal_title: Option<String>,
    pub review: String,
    pub rating: f64,
    pub reviewer: UserRef,
    #[serde(default)]
    pub likes: i64,
    pub created_at: DateTime,
}

impl Review {
    pub const COLLECTION: &'static str = "reviews";
}
