use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    /// Membership tier bought with this payment.
    pub badge: String,
    pub amount: f64,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    pub created_at: DateTime,
}

impl Payment {
    pub const COLLECTION: &'static str = "payments";
}
