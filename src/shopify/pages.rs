//! Hosted-page REST operations backing the label publish upsert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use super::{PagesApi, ShopifyClient, ShopifyError};
use crate::middleware::session::ShopSession;

/// Online-store page as returned by the Admin REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedPage {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PagesEnvelope {
    pages: Vec<HostedPage>,
}

#[derive(Debug, Deserialize)]
struct PageEnvelope {
    page: HostedPage,
}

impl PagesApi for ShopifyClient {
    #[instrument(skip(self, session), fields(shop = %session.shop()))]
    async fn list_pages(&self, session: &ShopSession) -> Result<Vec<HostedPage>, ShopifyError> {
        let envelope: PagesEnvelope = self.get_json(session, "pages.json", &[]).await?;
        Ok(envelope.pages)
    }

    #[instrument(skip(self, session, body_html), fields(shop = %session.shop()))]
    async fn create_page(
        &self,
        session: &ShopSession,
        title: &str,
        body_html: &str,
    ) -> Result<HostedPage, ShopifyError> {
        let body = json!({ "page": { "title": title, "body_html": body_html } });
        let envelope: PageEnvelope = self.post_json(session, "pages.json", &body).await?;
        Ok(envelope.page)
    }

    #[instrument(skip(self, session, body_html), fields(shop = %session.shop()))]
    async fn update_page(
        &self,
        session: &ShopSession,
        page_id: i64,
        body_html: &str,
    ) -> Result<HostedPage, ShopifyError> {
        let body = json!({ "page": { "id": page_id, "body_html": body_html } });
        let envelope: PageEnvelope = self
            .put_json(session, &format!("pages/{page_id}.json"), &body)
            .await?;
        Ok(envelope.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope_deserializes() {
        let envelope: PageEnvelope = serde_json::from_str(
            r#"{"page": {"id": 7, "title": "print_label", "handle": "print_label"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.page.id, 7);
        assert_eq!(envelope.page.title, "print_label");
        assert!(envelope.page.body_html.is_none());
    }
}
