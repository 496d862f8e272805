use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shopify::orders::{CustomerSummary, ShippingLine};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateQrCodeRequest {
    pub title: String,
    pub product_id: String,
    pub variant_id: String,
    pub handle: String,
    #[serde(default)]
    pub discount_id: Option<String>,
    #[serde(default)]
    pub discount_code: Option<String>,
    pub destination: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QrCodePatch {
    pub title: Option<String>,
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub handle: Option<String>,
    pub discount_id: Option<String>,
    pub discount_code: Option<String>,
    pub destination: Option<String>,
}

/// Uniform response shape consumed by the admin UI, for both local records
/// and remote order rows.
///
/// Wire names are kept exactly as the frontend expects them, including the
/// historical `shiping_lines` spelling.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormattedResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,
    #[serde(rename = "shiping_lines", skip_serializing_if = "Vec::is_empty")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scans: Option<i64>,
}
