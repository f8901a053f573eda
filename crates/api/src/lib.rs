pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .settings
        .app
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    // Token routes
    let auth_routes = Router::new()
        .route("/jwt", post(routes::auth::issue_token))
        .route("/logout", post(routes::auth::logout));

    // Meal routes
    let meal_routes = Router::new()
        .route("/meals", get(routes::meal::list).post(routes::meal::create))
        .route("/meals/sort", post(routes::meal::sort))
        .route("/meals/like/{id}", patch(routes::meal::like))
        .route(
            "/meals/{id}",
            get(routes::meal::get)
                .put(routes::meal::update)
                .delete(routes::meal::delete),
        )
        .route("/search-meals", post(routes::meal::search))
        .route("/filter-meals", post(routes::meal::filter));

    // Upcoming meal routes
    let upcoming_routes = Router::new()
        .route(
            "/upcoming-meals",
            get(routes::upcoming::list).post(routes::upcoming::create),
        )
        .route("/upcoming-meals/publish/{id}", patch(routes::upcoming::publish))
        .route("/upcoming-likes/{id}", patch(routes::upcoming::like));

    // User routes
    let user_routes = Router::new()
        .route("/users", get(routes::user::list).post(routes::user::create))
        .route("/users/admin/{email}", get(routes::user::is_admin))
        .route("/users/{email}", get(routes::user::get))
        .route("/user/admin", patch(routes::user::make_admin))
        .route("/search-users", post(routes::user::search));

    // Review routes
    let review_routes = Router::new()
        .route("/reviews", get(routes::review::list).post(routes::review::create))
        .route(
            "/reviews/{id}",
            get(routes::review::for_meal)
                .patch(routes::review::update)
                .delete(routes::review::delete),
        )
        .route("/student_reviews/{email}", get(routes::review::by_student))
        .route("/search-review", post(routes::review::search));

    // Meal request routes
    let request_routes = Router::new()
        .route(
            "/requestedMeals",
            get(routes::requested_meal::list).post(routes::requested_meal::create),
        )
        .route("/requestedMeals/check", get(routes::requested_meal::check))
        .route(
            "/requestedMeals/{id}",
            get(routes::requested_meal::by_requester)
                .patch(routes::requested_meal::deliver)
                .delete(routes::requested_meal::delete),
        );

    // Payment routes
    let payment_routes = Router::new()
        .route("/create-payment-intent", post(routes::payment::create_intent))
        .route("/payments", post(routes::payment::record))
        .route("/payments/{email}", get(routes::payment::history));

    // Health check
    let health = Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check));

    Router::new()
        .merge(auth_routes)
        .merge(meal_routes)
        .merge(upcoming_routes)
        .merge(user_routes)
        .merge(review_routes)
        .merge(request_routes)
        .merge(payment_routes)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn banner() -> &'static str {
    "Loading delicious meals"
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
