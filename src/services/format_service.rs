//! Pure mapping of local records and remote orders into the UI response
//! shape. No IO, no cross-item joins; output order and count always match
//! the input.

use crate::dto::qr_codes::FormattedResponse;
use crate::error::{AppError, AppResult};
use crate::models::QrCode;
use crate::shopify::OrderSummary;

/// Fulfillment status as the UI displays it: unset means nothing has
/// shipped yet.
fn normalize_fulfillment(status: Option<&str>) -> &'static str {
    match status {
        None => "processing",
        Some(_) => "complete",
    }
}

pub fn format_order(order: &OrderSummary) -> AppResult<FormattedResponse> {
    if order.id <= 0 {
        return Err(AppError::BadRequest(
            "malformed source record: order is missing an id".to_string(),
        ));
    }
    let created_at = order.created_at.ok_or_else(|| {
        AppError::BadRequest(format!(
            "malformed source record: order {} has no creation timestamp",
            order.id
        ))
    })?;

    Ok(FormattedResponse {
        id: order.id.to_string(),
        name: order.name.clone(),
        created_at,
        total_price: order.total_price.clone(),
        total_weight: order.total_weight,
        fulfillment_status: Some(
            normalize_fulfillment(order.fulfillment_status.as_deref()).to_string(),
        ),
        shipping_lines: order.shipping_lines.clone(),
        tags: order.tags.clone(),
        customer: order.customer.clone(),
        title: None,
        product_id: None,
        variant_id: None,
        handle: None,
        discount_id: None,
        discount_code: None,
        destination: None,
        scans: None,
    })
}

pub fn format_record(record: &QrCode) -> AppResult<FormattedResponse> {
    if record.shop_domain.is_empty() {
        return Err(AppError::BadRequest(format!(
            "malformed source record: record {} has no shop domain",
            record.id
        )));
    }

    Ok(FormattedResponse {
        id: record.id.to_string(),
        name: None,
        created_at: record.created_at,
        total_price: None,
        total_weight: None,
        fulfillment_status: None,
        shipping_lines: Vec::new(),
        tags: String::new(),
        customer: None,
        title: Some(record.title.clone()),
        product_id: Some(record.product_id.clone()),
        variant_id: Some(record.variant_id.clone()),
        handle: Some(record.handle.clone()),
        discount_id: record.discount_id.clone(),
        discount_code: record.discount_code.clone(),
        destination: Some(record.destination.clone()),
        scans: Some(record.scans),
    })
}

/// A single malformed item fails the whole call; no partial output.
pub fn format_orders(orders: &[OrderSummary]) -> AppResult<Vec<FormattedResponse>> {
    orders.iter().map(format_order).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, fulfillment_status: Option<&str>) -> OrderSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("#{id}"),
            "created_at": "2022-12-05T10:00:00Z",
            "total_price": "359.90",
            "fulfillment_status": fulfillment_status,
        }))
        .unwrap()
    }

    #[test]
    fn output_preserves_order_and_count() {
        let orders = vec![order(3, None), order(1, Some("shipped")), order(2, None)];
        let formatted = format_orders(&orders).unwrap();
        assert_eq!(formatted.len(), orders.len());
        let ids: Vec<&str> = formatted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn absent_fulfillment_status_reads_processing() {
        let formatted = format_order(&order(1, None)).unwrap();
        assert_eq!(formatted.fulfillment_status.as_deref(), Some("processing"));

        let formatted = format_order(&order(2, Some("partial"))).unwrap();
        assert_eq!(formatted.fulfillment_status.as_deref(), Some("complete"));
    }

    #[test]
    fn missing_identity_fails_the_whole_call() {
        let mut bad = order(5, None);
        bad.created_at = None;
        let orders = vec![order(1, None), bad];
        let err = format_orders(&orders).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn created_at_is_camel_cased_on_the_wire() {
        let formatted = format_order(&order(1, None)).unwrap();
        let json = serde_json::to_value(&formatted).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
