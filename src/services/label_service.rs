//! Printable label assembly.
//!
//! A label document is three panels: packing slip, return form and reply
//! card. The tracking id is Code 39 encoded once and embedded in every panel
//! at a panel-specific size. Rendering is pure and deterministic; the same
//! request always yields byte-identical HTML.

use askama::Template;

use crate::barcode::Code39;
use crate::dto::labels::{LabelLineItem, Recipient, ShipmentLabelRequest};
use crate::error::{AppError, AppResult};

pub const PANEL_COUNT: usize = 3;

/// Rendered artifact: the individual panels plus the document that wraps
/// them for the hosted page body.
#[derive(Debug, Clone)]
pub struct LabelDocument {
    pub panels: [String; PANEL_COUNT],
    pub html: String,
}

#[derive(Template)]
#[template(path = "label/packing_slip.html")]
struct PackingSlipPanel<'a> {
    marker: &'a str,
    barcode: &'a str,
    shipping_id: &'a str,
    order_label: &'a str,
    recipient: &'a Recipient,
    line_items: &'a [LabelLineItem],
    notes: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "label/return_form.html")]
struct ReturnFormPanel<'a> {
    marker: &'a str,
    barcode: &'a str,
    shipping_id: &'a str,
    order_label: &'a str,
    recipient: &'a Recipient,
}

#[derive(Template)]
#[template(path = "label/reply_card.html")]
struct ReplyCardPanel<'a> {
    marker: &'a str,
    barcode: &'a str,
    shipping_id: &'a str,
    order_label: &'a str,
}

#[derive(Template)]
#[template(path = "label/document.html")]
struct DocumentTemplate<'a> {
    panels: &'a [String; PANEL_COUNT],
}

fn render<T: Template>(template: &T) -> AppResult<String> {
    template
        .render()
        .map_err(|err| AppError::Render(err.to_string()))
}

pub fn render_label(request: &ShipmentLabelRequest) -> AppResult<LabelDocument> {
    let bars = Code39::encode(&request.shipping_id)
        .map_err(|err| AppError::Render(err.to_string()))?;

    let order_label = request
        .order_ref
        .clone()
        .unwrap_or_else(|| format!("#{}", request.order_id));

    let packing_slip = render(&PackingSlipPanel {
        marker: "1 of 3",
        barcode: &bars.to_data_uri(2, 60),
        shipping_id: &request.shipping_id,
        order_label: &order_label,
        recipient: &request.recipient,
        line_items: &request.line_items,
        notes: request.notes.as_deref(),
    })?;

    let return_form = render(&ReturnFormPanel {
        marker: "2 of 3",
        barcode: &bars.to_data_uri(2, 50),
        shipping_id: &request.shipping_id,
        order_label: &order_label,
        recipient: &request.recipient,
    })?;

    let reply_card = render(&ReplyCardPanel {
        marker: "3 of 3",
        barcode: &bars.to_data_uri(1, 40),
        shipping_id: &request.shipping_id,
        order_label: &order_label,
    })?;

    let panels = [packing_slip, return_form, reply_card];
    let html = render(&DocumentTemplate { panels: &panels })?;

    Ok(LabelDocument { panels, html })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(shipping_id: &str) -> ShipmentLabelRequest {
        serde_json::from_value(serde_json::json!({
            "shippingId": shipping_id,
            "orderId": 484312,
            "recipient": {"name": "Jamie Park", "address": "1 High St", "phone": "555-0101"},
            "line_items": [{"name": "Mug", "quantity": 2}],
            "notes": "fragile"
        }))
        .unwrap()
    }

    #[test]
    fn document_contains_three_marked_panels() {
        let doc = render_label(&request("54103029")).unwrap();
        assert_eq!(doc.panels.len(), 3);
        for (i, panel) in doc.panels.iter().enumerate() {
            assert!(panel.contains(&format!("{} of 3", i + 1)));
            assert!(panel.contains("data:image/svg+xml;base64,"));
            assert!(panel.contains("54103029"));
            assert!(doc.html.contains(panel.as_str()));
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let a = render_label(&request("54103029")).unwrap();
        let b = render_label(&request("54103029")).unwrap();
        assert_eq!(a.html, b.html);
    }

    #[test]
    fn blank_recipient_fields_keep_their_rows() {
        let request: ShipmentLabelRequest = serde_json::from_value(serde_json::json!({
            "shippingId": "54103029",
            "orderId": 484312,
            "recipient": {"name": "Jamie Park"}
        }))
        .unwrap();
        let doc = render_label(&request).unwrap();

        // the table layout stays fixed for print alignment; absent fields
        // render as blank cells, not missing rows
        assert!(doc.panels[0].contains("<th>Address</th>"));
        assert!(doc.panels[0].contains("<th>Phone</th>"));
        assert!(doc.panels[0].contains("class=\"notes\""));
        assert!(doc.panels[1].contains("<th>Address</th>"));
    }

    #[test]
    fn unencodable_shipping_id_is_a_render_failure() {
        let err = render_label(&request("54_10")).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
