use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::qr_codes::{CreateQrCodeRequest, FormattedResponse, QrCodePatch},
    error::{AppError, AppResult},
    middleware::session::ShopSession,
    services::{format_service, order_service},
    shopify::StatusBucket,
    state::AppState,
    store::QrCodeStore,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    #[serde(rename = "tabIndex")]
    pub tab_index: Option<StatusBucket>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_qr_code))
        .route(
            "/{id}",
            get(get_qr_code)
                .patch(update_qr_code)
                .delete(delete_qr_code),
        )
}

#[utoipa::path(
    get,
    path = "/api/qrcodes",
    params(
        ("tabIndex" = Option<StatusBucket>, Query, description = "Fulfillment bucket, default All")
    ),
    responses(
        (status = 200, description = "Orders for the bucket", body = Vec<FormattedResponse>),
        (status = 401, description = "Invalid session token"),
        (status = 500, description = "Remote order fetch failed")
    ),
    security(("bearer_auth" = [])),
    tag = "QR Codes"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    session: ShopSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<FormattedResponse>>> {
    let bucket = query.tab_index.unwrap_or(StatusBucket::All);
    let orders = order_service::list_orders(&state.shopify, &session, bucket).await?;
    Ok(Json(format_service::format_orders(&orders)?))
}

#[utoipa::path(
    post,
    path = "/api/qrcodes",
    request_body = CreateQrCodeRequest,
    responses(
        (status = 201, description = "Record created", body = FormattedResponse),
        (status = 401, description = "Invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "QR Codes"
)]
pub async fn create_qr_code(
    State(state): State<AppState>,
    session: ShopSession,
    Json(payload): Json<CreateQrCodeRequest>,
) -> AppResult<(StatusCode, Json<FormattedResponse>)> {
    let record = state.store.create(session.shop(), &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(format_service::format_record(&record)?),
    ))
}

#[utoipa::path(
    get,
    path = "/api/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "Record ID")),
    responses(
        (status = 200, description = "The record", body = FormattedResponse),
        (status = 404, description = "No such record for this shop")
    ),
    security(("bearer_auth" = [])),
    tag = "QR Codes"
)]
pub async fn get_qr_code(
    State(state): State<AppState>,
    session: ShopSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormattedResponse>> {
    let record = state
        .store
        .get(session.shop(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(format_service::format_record(&record)?))
}

#[utoipa::path(
    patch,
    path = "/api/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "Record ID")),
    request_body = QrCodePatch,
    responses(
        (status = 200, description = "Updated record", body = FormattedResponse),
        (status = 404, description = "No such record for this shop")
    ),
    security(("bearer_auth" = [])),
    tag = "QR Codes"
)]
pub async fn update_qr_code(
    State(state): State<AppState>,
    session: ShopSession,
    Path(id): Path<Uuid>,
    Json(patch): Json<QrCodePatch>,
) -> AppResult<Json<FormattedResponse>> {
    let record = state
        .store
        .update(session.shop(), id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(format_service::format_record(&record)?))
}

#[utoipa::path(
    delete,
    path = "/api/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "No such record for this shop")
    ),
    security(("bearer_auth" = [])),
    tag = "QR Codes"
)]
pub async fn delete_qr_code(
    State(state): State<AppState>,
    session: ShopSession,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.store.delete(session.shop(), id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::OK)
}
