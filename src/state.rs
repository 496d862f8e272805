use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::publish_service::PublishLocks;
use crate::shopify::ShopifyClient;
use crate::store::PgQrCodeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PgQrCodeStore,
    pub shopify: ShopifyClient,
    pub locks: PublishLocks,
    pub config: Arc<AppConfig>,
}
