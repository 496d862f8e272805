use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        labels::{LabelLineItem, PrintLabelQuery, Recipient, ShipmentLabelRequest},
        qr_codes::{CreateQrCodeRequest, FormattedResponse, QrCodePatch},
    },
    models::QrCode,
    routes::{discounts, health, labels, qr_codes},
    shopify::StatusBucket,
    shopify::orders::{CustomerSummary, ShippingLine},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        qr_codes::list_orders,
        qr_codes::create_qr_code,
        qr_codes::get_qr_code,
        qr_codes::update_qr_code,
        qr_codes::delete_qr_code,
        discounts::list_discounts,
        labels::print_label
    ),
    components(
        schemas(
            QrCode,
            FormattedResponse,
            CreateQrCodeRequest,
            QrCodePatch,
            ShipmentLabelRequest,
            Recipient,
            LabelLineItem,
            PrintLabelQuery,
            StatusBucket,
            ShippingLine,
            CustomerSummary,
            qr_codes::OrderListQuery,
            discounts::DiscountListQuery,
            health::HealthData
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "QR Codes", description = "QR code records and the order list"),
        (name = "Discounts", description = "Discount passthrough"),
        (name = "Labels", description = "Shipping label rendering and publishing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
