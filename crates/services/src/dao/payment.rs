use bson::{doc, oid::ObjectId, DateTime};
use hostelmate_db::models::Payment;
use mongodb::Database;
use serde::Serialize;
use tracing::{error, info};

use super::base::{BaseDao, DaoError, DaoResult};
use super::user::UserDao;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub inserted_id: String,
    pub badge: String,
}

pub struct PaymentDao {
    pub base: BaseDao<Payment>,
}

impl PaymentDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Payment::COLLECTION),
        }
    }

    /// Stores the payment and moves the payer to the purchased badge. The
    /// payment is removed again when the badge update fails.
    pub async fn record(
        &self,
        users: &UserDao,
        user_email: String,
        badge: String,
        amount: f64,
        transaction_id: String,
    ) -> DaoResult<PaymentReceipt> {
        let payment = Payment {
            id: None,
            user_email,
            badge,
            amount,
            transaction_id,
            created_at: DateTime::now(),
        };
        let payment_id = self.base.insert_one(&payment).await?;

        match users.set_badge(&payment.user_email, &payment.badge).await {
            Ok(outcome) if outcome.matched_count == 1 => {
                info!(
                    email = %payment.user_email,
                    badge = %payment.badge,
                    amount = payment.amount,
                    "Payment recorded"
                );
                Ok(PaymentReceipt {
                    inserted_id: payment_id.to_hex(),
                    badge: payment.badge,
                })
            }
            Ok(_) => {
                self.compensate(payment_id).await;
                Err(DaoError::NotFound)
            }
            Err(e) => {
                self.compensate(payment_id).await;
                Err(e)
            }
        }
    }

    async fn compensate(&self, payment_id: ObjectId) {
        if let Err(e) = self.base.delete_by_id(payment_id).await {
            error!(payment_id = %payment_id, error = %e, "Failed to roll back payment insert");
        }
    }

    pub async fn history(&self, email: &str) -> DaoResult<Vec<Payment>> {
        self.base
            .find_many(doc! { "userEmail": email }, Some(doc! { "created_at": -1 }))
            .await
    }
}
