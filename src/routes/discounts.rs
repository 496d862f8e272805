use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult, middleware::session::ShopSession, shopify::DiscountsApi, state::AppState,
};

const DEFAULT_PAGE_SIZE: i64 = 25;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DiscountListQuery {
    pub first: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_discounts))
}

#[utoipa::path(
    get,
    path = "/api/discounts",
    params(
        ("first" = Option<i64>, Query, description = "Number of discounts to return, default 25")
    ),
    responses(
        (status = 200, description = "Code discount nodes, passed through from the Admin API"),
        (status = 401, description = "Invalid session token"),
        (status = 500, description = "Remote discount query failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Discounts"
)]
pub async fn list_discounts(
    State(state): State<AppState>,
    session: ShopSession,
    Query(query): Query<DiscountListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let first = query.first.unwrap_or(DEFAULT_PAGE_SIZE);
    let discounts = state.shopify.list_discounts(&session, first).await?;
    Ok(Json(discounts))
}
