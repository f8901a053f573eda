use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::role::Role;

pub const DEFAULT_BADGE: &str = "Bronze";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Membership tier, rewritten by the payment flow.
    #[serde(default = "default_badge")]
    pub badge: String,
    pub created_at: DateTime,
}

/// Name/email pair embedded in meals, reviews and requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRef {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

fn default_badge() -> String {
    DEFAULT_BADGE.to_string()
}

impl User {
    pub const COLLECTION: &'static str = "users";

    pub fn to_ref(&self) -> UserRef {
        UserRef {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
