use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{ApiVersion, ShopifyError};
use crate::middleware::session::ShopSession;

/// REST/GraphQL client for the Shopify Admin API.
///
/// Cheap to clone; shop identity and credential are passed per call through
/// [`ShopSession`], never held by the client.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    http: reqwest::Client,
    version: ApiVersion,
}

impl ShopifyClient {
    #[must_use]
    pub fn new(version: ApiVersion) -> Self {
        Self {
            inner: Arc::new(ShopifyClientInner {
                http: reqwest::Client::new(),
                version,
            }),
        }
    }

    pub fn version(&self) -> ApiVersion {
        self.inner.version
    }

    fn rest_url(&self, shop: &str, path: &str) -> String {
        format!(
            "https://{}/admin/api/{}/{}",
            shop,
            self.inner.version.as_str(),
            path
        )
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        session: &ShopSession,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .http
            .get(self.rest_url(session.shop(), path))
            .query(query)
            .header("X-Shopify-Access-Token", session.access_token())
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub(super) async fn post_json<T: DeserializeOwned>(
        &self,
        session: &ShopSession,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .http
            .post(self.rest_url(session.shop(), path))
            .header("X-Shopify-Access-Token", session.access_token())
            .json(body)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub(super) async fn put_json<T: DeserializeOwned>(
        &self,
        session: &ShopSession,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .http
            .put(self.rest_url(session.shop(), path))
            .header("X-Shopify-Access-Token", session.access_token())
            .json(body)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Execute a GraphQL query and return the raw `data` payload.
    pub(super) async fn graphql(
        &self,
        session: &ShopSession,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let response = self
            .inner
            .http
            .post(self.rest_url(session.shop(), "graphql.json"))
            .header("X-Shopify-Access-Token", session.access_token())
            .json(&body)
            .send()
            .await?;

        let payload: serde_json::Value = Self::check(response).await?.json().await?;

        if let Some(errors) = payload.get("errors")
            && !errors.is_null()
        {
            return Err(ShopifyError::GraphQL(errors.to_string()));
        }

        Ok(payload.get("data").cloned().unwrap_or(serde_json::Value::Null))
    }

    /// Map non-success statuses onto the error taxonomy before the caller
    /// touches the body.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ShopifyError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}
