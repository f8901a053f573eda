pub mod auth;
pub mod meal;
pub mod payment;
pub mod requested_meal;
pub mod review;
pub mod upcoming;
pub mod user;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResponse {
    pub fn new(id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, message = "search must not be empty"))]
    pub search: String,
}

pub fn parse_oid(s: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(s).map_err(|_| ApiError::BadRequest(format!("Invalid ObjectId: {s}")))
}

pub fn rfc3339(dt: bson::DateTime) -> String {
    dt.try_to_rfc3339_string().unwrap_or_default()
}
