use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Stand-in for the Stripe REST API. Records every PaymentIntent form it
/// receives and answers with a deterministic client secret. Created intents
/// are reported as `succeeded` on retrieval, as if the card was confirmed.
#[derive(Clone, Default)]
pub struct MockStripe {
    pub requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub intents: Arc<Mutex<HashMap<String, i64>>>,
}

impl MockStripe {
    /// Serves the mock on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v1/payment_intents", post(create_payment_intent))
            .route("/v1/payment_intents/{id}", get(retrieve_payment_intent))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock Stripe");
        let addr: SocketAddr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    pub fn received(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

async fn create_payment_intent(
    State(mock): State<MockStripe>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let amount = form
        .get("amount")
        .and_then(|a| a.parse::<i64>().ok())
        .unwrap_or_default();
    mock.requests.lock().unwrap().push(form);

    if amount <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": { "message": "Invalid positive integer" }
            })),
        );
    }

    let id = format!("pi_test_{amount}");
    mock.intents.lock().unwrap().insert(id.clone(), amount);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "id": id,
            "object": "payment_intent",
            "amount": amount,
            "currency": "usd",
            "client_secret": format!("pi_test_{amount}_secret_{amount}"),
            "payment_method_types": ["card"],
            "status": "requires_payment_method",
        })),
    )
}

async fn retrieve_payment_intent(
    State(mock): State<MockStripe>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let amount = mock.intents.lock().unwrap().get(&id).copied();
    match amount {
        Some(amount) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": id,
                "object": "payment_intent",
                "amount": amount,
                "currency": "usd",
                "client_secret": format!("{id}_secret_{amount}"),
                "status": "succeeded",
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": { "message": format!("No such payment_intent: '{id}'") }
            })),
        ),
    }
}
