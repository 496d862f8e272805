//! Discount listing via the Admin GraphQL API.
//!
//! The query result is forwarded to callers untouched; only transport
//! failures are interpreted here.

use serde_json::json;
use tracing::instrument;

use super::{DiscountsApi, ShopifyClient, ShopifyError};
use crate::middleware::session::ShopSession;

const DISCOUNTS_QUERY: &str = r#"
query discountNodes($first: Int!) {
  codeDiscountNodes(first: $first) {
    edges {
      node {
        id
        codeDiscount {
          ... on DiscountCodeBasic {
            title
            status
            codes(first: 1) {
              edges {
                node {
                  code
                }
              }
            }
          }
          ... on DiscountCodeBxgy {
            title
            status
            codes(first: 1) {
              edges {
                node {
                  code
                }
              }
            }
          }
          ... on DiscountCodeFreeShipping {
            title
            status
            codes(first: 1) {
              edges {
                node {
                  code
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

impl DiscountsApi for ShopifyClient {
    #[instrument(skip(self, session), fields(shop = %session.shop()))]
    async fn list_discounts(
        &self,
        session: &ShopSession,
        first: i64,
    ) -> Result<serde_json::Value, ShopifyError> {
        self.graphql(session, DISCOUNTS_QUERY, json!({ "first": first }))
            .await
    }
}
