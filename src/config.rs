use std::env;

use crate::shopify::ApiVersion;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// The myshopify.com domain this deployment serves.
    pub shop_domain: String,
    /// Offline Admin API access token for `shop_domain`.
    pub admin_access_token: String,
    /// App API key; session tokens must carry it as their audience.
    pub api_key: String,
    /// App shared secret used to verify session token signatures.
    pub api_secret: String,
    pub api_version: ApiVersion,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let shop_domain = env::var("SHOPIFY_SHOP_DOMAIN")?;
        let admin_access_token = env::var("SHOPIFY_ADMIN_ACCESS_TOKEN")?;
        let api_key = env::var("SHOPIFY_API_KEY")?;
        let api_secret = env::var("SHOPIFY_API_SECRET")?;
        let api_version = match env::var("SHOPIFY_API_VERSION") {
            Ok(raw) => raw.parse()?,
            Err(_) => ApiVersion::default(),
        };
        Ok(Self {
            database_url,
            host,
            port,
            shop_domain,
            admin_access_token,
            api_key,
            api_secret,
            api_version,
        })
    }
}
