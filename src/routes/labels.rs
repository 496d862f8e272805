use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    dto::labels::{PrintLabelQuery, ShipmentLabelRequest},
    error::{AppError, AppResult},
    middleware::session::ShopSession,
    services::{label_service, publish_service},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/printLabel",
    params(
        ("orderId" = i64, Query, description = "Order the label belongs to")
    ),
    request_body = ShipmentLabelRequest,
    responses(
        (status = 200, description = "Label rendered and published"),
        (status = 400, description = "Query and body disagree on the order"),
        (status = 401, description = "Invalid session token"),
        (status = 422, description = "Shipping id cannot be barcode-encoded"),
        (status = 500, description = "Page lookup or write failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Labels"
)]
pub async fn print_label(
    State(state): State<AppState>,
    session: ShopSession,
    Query(query): Query<PrintLabelQuery>,
    Json(payload): Json<ShipmentLabelRequest>,
) -> AppResult<StatusCode> {
    if query.order_id != payload.order_id {
        return Err(AppError::BadRequest(format!(
            "orderId mismatch: query says {}, body says {}",
            query.order_id, payload.order_id
        )));
    }

    let document = label_service::render_label(&payload)?;
    publish_service::publish_label_page(&state.shopify, &state.locks, &session, &document.html)
        .await?;

    Ok(StatusCode::OK)
}
