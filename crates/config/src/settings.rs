use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub stripe: StripeSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    /// Switches the auth cookie to `Secure; SameSite=None`.
    pub production: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StripeSettings {
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
}

pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://hostelmate-b7e8e.web.app",
    "https://hostelmate-b7e8e.firebaseapp.com",
];

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("HOSTELMATE")
                    .list_separator(",")
                    .with_list_parse_key("app.cors_origins")
                    .try_parsing(true),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 5000)?
            .set_default("app.production", false)?
            .set_default(
                "app.cors_origins",
                DEFAULT_CORS_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>(),
            )?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "HostelMateDB")?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.token_ttl_secs", 86400)?
            .set_default("stripe.secret_key", "")?
            .set_default("stripe.api_base", "https://api.stripe.com")?
            .set_default("stripe.currency", "usd")?
            .build()?;

        config.try_deserialize()
    }
}
