use axum::{Router, routing::get};

use crate::state::AppState;

pub mod discounts;
pub mod doc;
pub mod health;
pub mod labels;
pub mod qr_codes;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/qrcodes", qr_codes::router())
        .nest("/discounts", discounts::router())
        .route("/printLabel", get(labels::print_label))
}
