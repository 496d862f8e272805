use serde::Deserialize;
use utoipa::ToSchema;

/// Caller input for a label print: tracking id, order identity, recipient
/// and line items to list on the packing slip.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShipmentLabelRequest {
    #[serde(rename = "shippingId")]
    pub shipping_id: String,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(default)]
    pub order_ref: Option<String>,
    pub recipient: Recipient,
    #[serde(default)]
    pub line_items: Vec<LabelLineItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Recipient {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LabelLineItem {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PrintLabelQuery {
    #[serde(rename = "orderId")]
    pub order_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_identifiers() {
        let req: ShipmentLabelRequest = serde_json::from_str(
            r#"{
                "shippingId": "54103029",
                "orderId": 484312,
                "recipient": {"name": "Jamie Park"},
                "line_items": [{"name": "Mug", "quantity": 2}]
            }"#,
        )
        .unwrap();
        assert_eq!(req.shipping_id, "54103029");
        assert_eq!(req.order_id, 484312);
        assert_eq!(req.line_items.len(), 1);
        assert!(req.notes.is_none());
    }
}
