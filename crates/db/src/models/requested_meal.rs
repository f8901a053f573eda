use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedMeal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub requester: UserRef,
    pub meal: MealRef,
    #[serde(default)]
    pub status: RequestStatus,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRef {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Requested,
    Delivered,
}

impl RequestedMeal {
    pub const COLLECTION: &'static str = "requested_meals";
}
