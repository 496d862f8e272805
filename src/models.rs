use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A QR code record owned by a shop.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct QrCode {
    pub id: Uuid,
    pub shop_domain: String,
    pub title: String,
    pub product_id: String,
    pub variant_id: String,
    pub handle: String,
    pub discount_id: Option<String>,
    pub discount_code: Option<String>,
    /// Where a scan lands: the product page or straight to checkout.
    pub destination: String,
    pub scans: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
