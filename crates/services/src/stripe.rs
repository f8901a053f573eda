use hostelmate_config::StripeSettings;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ---- Response / DTO types ------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub status: String,
}

impl PaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

// ---- Error type ----------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Payment not verified: {0}")]
    Unverified(String),
    #[error("Stripe API error: {0}")]
    ApiError(String),
}

/// Converts a major-unit price into the minor units Stripe charges in.
pub fn to_minor_units(price: f64) -> Result<i64, StripeError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(StripeError::InvalidAmount(format!(
            "price must be a positive number, got {price}"
        )));
    }
    let cents = (price * 100.0).round();
    if cents < 1.0 || cents > i64::MAX as f64 {
        return Err(StripeError::InvalidAmount(format!("price {price} is out of range")));
    }
    Ok(cents as i64)
}

// ---- Service -------------------------------------------------------------

pub struct StripeService {
    settings: StripeSettings,
    client: reqwest::Client,
}

impl StripeService {
    pub fn new(settings: &StripeSettings) -> Self {
        Self {
            settings: settings.clone(),
            client: reqwest::Client::new(),
        }
    }

    // ---- Payment intents -------------------------------------------------

    /// Creates a card-only PaymentIntent for `price` (major units).
    pub async fn create_payment_intent(&self, price: f64) -> Result<PaymentIntent, StripeError> {
        let amount = to_minor_units(price)?;
        let amount_str = amount.to_string();

        let params = [
            ("amount", amount_str.as_str()),
            ("currency", self.settings.currency.as_str()),
            ("payment_method_types[]", "card"),
        ];

        let request = self
            .client
            .post(self.intents_url())
            .basic_auth(&self.settings.secret_key, None::<&str>)
            .form(&params);
        let intent = self.send(request).await?;

        info!(intent_id = %intent.id, amount = intent.amount, "Created Stripe PaymentIntent");
        Ok(intent)
    }

    pub async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, StripeError> {
        if !is_intent_id(id) {
            return Err(StripeError::Unverified(format!("unknown transaction {id}")));
        }

        let request = self
            .client
            .get(format!("{}/{id}", self.intents_url()))
            .basic_auth(&self.settings.secret_key, None::<&str>);
        self.send(request).await
    }

    /// Checks that `transaction_id` names a settled PaymentIntent for exactly
    /// `amount` (major units).
    pub async fn verify_payment(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<PaymentIntent, StripeError> {
        let expected = to_minor_units(amount)?;
        let intent = self.retrieve_payment_intent(transaction_id).await?;

        if !intent.is_succeeded() {
            return Err(StripeError::Unverified(format!(
                "transaction {} is {}",
                intent.id, intent.status
            )));
        }
        if intent.amount != expected {
            warn!(
                intent_id = %intent.id,
                charged = intent.amount,
                claimed = expected,
                "Payment amount does not match PaymentIntent"
            );
            return Err(StripeError::Unverified(format!(
                "transaction {} does not match amount",
                intent.id
            )));
        }
        Ok(intent)
    }

    fn intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.settings.api_base.trim_end_matches('/')
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<PaymentIntent, StripeError> {
        let resp = request
            .send()
            .await
            .map_err(|e| StripeError::ApiError(e.to_string()))?;
        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| StripeError::ApiError(e.to_string()))?;

        if let Some(err) = body.get("error") {
            let message = err["message"]
                .as_str()
                .unwrap_or("Unknown Stripe error")
                .to_string();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(StripeError::Unverified(message));
            }
            return Err(StripeError::ApiError(message));
        }

        serde_json::from_value(body)
            .map_err(|e| StripeError::ApiError(format!("Unexpected PaymentIntent payload: {e}")))
    }
}

fn is_intent_id(id: &str) -> bool {
    id.starts_with("pi_") && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
