//! Remote order listing by fulfillment bucket.

use crate::error::AppResult;
use crate::middleware::session::ShopSession;
use crate::shopify::{OrderSummary, OrdersApi, StatusBucket};

/// Fetch the orders for one bucket, preserving the remote's ordering.
/// Auth failures surface as unauthenticated, everything else as an upstream
/// failure with the remote's message.
pub async fn list_orders(
    api: &impl OrdersApi,
    session: &ShopSession,
    bucket: StatusBucket,
) -> AppResult<Vec<OrderSummary>> {
    Ok(api.fetch_orders(session, bucket).await?)
}
