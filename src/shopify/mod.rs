//! Shopify Admin API surface used by the core: order fetch by fulfillment
//! bucket, hosted-page list/create/update, and the discounts passthrough.
//!
//! The API version is resolved once at startup into [`ApiVersion`] and baked
//! into the client's URL builder; call sites never branch on version strings.
//! Each capability is a trait so services can be exercised against in-memory
//! fakes.

mod client;
pub mod discounts;
pub mod orders;
pub mod pages;

pub use client::ShopifyClient;
pub use orders::{OrderSummary, StatusBucket};
pub use pages::HostedPage;

use std::future::Future;
use std::str::FromStr;

use thiserror::Error;

use crate::middleware::session::ShopSession;

/// Errors that can occur when talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Non-success status with the upstream body surfaced verbatim.
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {0}")]
    GraphQL(String),
}

/// Admin API version, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    V2024_10,
    V2025_01,
    V2025_04,
    #[default]
    V2025_07,
}

impl ApiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V2024_10 => "2024-10",
            ApiVersion::V2025_01 => "2025-01",
            ApiVersion::V2025_04 => "2025-04",
            ApiVersion::V2025_07 => "2025-07",
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported Shopify API version: {0}")]
pub struct ApiVersionParseError(String);

impl FromStr for ApiVersion {
    type Err = ApiVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2024-10" => Ok(ApiVersion::V2024_10),
            "2025-01" => Ok(ApiVersion::V2025_01),
            "2025-04" => Ok(ApiVersion::V2025_04),
            "2025-07" => Ok(ApiVersion::V2025_07),
            other => Err(ApiVersionParseError(other.to_string())),
        }
    }
}

/// Fetch remote orders filtered by fulfillment-status bucket.
pub trait OrdersApi: Send + Sync {
    fn fetch_orders(
        &self,
        session: &ShopSession,
        bucket: StatusBucket,
    ) -> impl Future<Output = Result<Vec<OrderSummary>, ShopifyError>> + Send;
}

/// Hosted-page operations needed by the label publish upsert.
pub trait PagesApi: Send + Sync {
    fn list_pages(
        &self,
        session: &ShopSession,
    ) -> impl Future<Output = Result<Vec<HostedPage>, ShopifyError>> + Send;

    fn create_page(
        &self,
        session: &ShopSession,
        title: &str,
        body_html: &str,
    ) -> impl Future<Output = Result<HostedPage, ShopifyError>> + Send;

    fn update_page(
        &self,
        session: &ShopSession,
        page_id: i64,
        body_html: &str,
    ) -> impl Future<Output = Result<HostedPage, ShopifyError>> + Send;
}

/// Stateless discount-listing passthrough.
pub trait DiscountsApi: Send + Sync {
    fn list_discounts(
        &self,
        session: &ShopSession,
        first: i64,
    ) -> impl Future<Output = Result<serde_json::Value, ShopifyError>> + Send;
}
