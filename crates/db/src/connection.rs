use hostelmate_config::{DatabaseSettings, Settings};
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{error, info};

const APP_NAME: &str = "hostelmate-api";

/// Connects to the meal store and checks the deployment answers a ping
/// before the server starts taking requests.
pub async fn connect(settings: &Settings) -> Result<Database, mongodb::error::Error> {
    let client_options = client_options(&settings.database).await?;
    info!(
        db = %settings.database.name,
        max_pool_size = ?client_options.max_pool_size,
        min_pool_size = ?client_options.min_pool_size,
        "Connecting to HostelMate store"
    );

    let client = Client::with_options(client_options)?;

    if let Err(e) = client
        .database("admin")
        .run_command(bson::doc! { "ping": 1 })
        .await
    {
        error!(db = %settings.database.name, error = %e, "HostelMate store did not answer ping");
        return Err(e);
    }

    info!(db = %settings.database.name, "Connected to MongoDB");

    Ok(client.database(&settings.database.name))
}

async fn client_options(database: &DatabaseSettings) -> Result<ClientOptions, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&database.url).await?;
    client_options.app_name = Some(APP_NAME.to_string());

    if let Some(max_pool) = database.max_pool_size {
        client_options.max_pool_size = Some(max_pool);
    }
    if let Some(min_pool) = database.min_pool_size {
        client_options.min_pool_size = Some(min_pool);
    }
    Ok(client_options)
}
