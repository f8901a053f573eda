use hostelmate_api::{build_router, state::AppState};
use hostelmate_config::Settings;
use hostelmate_db::{connect, indexes::ensure_indexes};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "hostelmate_api=debug,hostelmate_services=debug,hostelmate_db=debug,tower_http=debug"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        "Starting HostelMate API on {}:{}",
        settings.app.host, settings.app.port
    );
    info!(
        production = settings.app.production,
        cors_origins = ?settings.app.cors_origins,
        stripe_configured = !settings.stripe.secret_key.is_empty(),
        "Runtime config"
    );

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    let app_state = AppState::new(db, settings.clone());

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Meals coming in {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
