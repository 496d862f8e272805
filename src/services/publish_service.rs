//! Idempotent publish of the label document as a single hosted page.
//!
//! The page title is the natural key. Lookup and write happen under a
//! per-shop lock so two concurrent publishes cannot both miss the lookup
//! and create duplicate pages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::middleware::session::ShopSession;
use crate::shopify::PagesApi;

/// Well-known title of the hosted label page.
pub const LABEL_PAGE_TITLE: &str = "print_label";

/// Per-(shop, title) async locks serializing the lookup-then-write window.
#[derive(Clone, Default)]
pub struct PublishLocks {
    inner: Arc<StdMutex<HashMap<(String, String), Arc<Mutex<()>>>>>,
}

impl PublishLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self, shop: &str, title: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap();
        map.entry((shop.to_string(), title.to_string()))
            .or_default()
            .clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created(i64),
    Updated(i64),
}

impl PublishOutcome {
    pub fn page_id(self) -> i64 {
        match self {
            PublishOutcome::Created(id) | PublishOutcome::Updated(id) => id,
        }
    }
}

/// Publish `body_html` as the shop's label page, updating the existing page
/// if one carries the title, creating it otherwise.
///
/// A failed lookup is an upstream failure and nothing has been written. A
/// failed write after a successful lookup is reported distinctly; the whole
/// upsert is safe to re-invoke.
pub async fn publish_label_page(
    api: &impl PagesApi,
    locks: &PublishLocks,
    session: &ShopSession,
    body_html: &str,
) -> AppResult<PublishOutcome> {
    let lock = locks.acquire(session.shop(), LABEL_PAGE_TITLE);
    let _guard = lock.lock().await;

    let pages = api.list_pages(session).await.map_err(AppError::from)?;
    let existing = pages.iter().find(|p| p.title == LABEL_PAGE_TITLE);

    let outcome = match existing {
        Some(page) => {
            let updated = api
                .update_page(session, page.id, body_html)
                .await
                .map_err(|err| AppError::PublishIncomplete(err.to_string()))?;
            PublishOutcome::Updated(updated.id)
        }
        None => {
            let created = api
                .create_page(session, LABEL_PAGE_TITLE, body_html)
                .await
                .map_err(|err| AppError::PublishIncomplete(err.to_string()))?;
            PublishOutcome::Created(created.id)
        }
    };

    info!(
        shop = %session.shop(),
        page_id = outcome.page_id(),
        created = matches!(outcome, PublishOutcome::Created(_)),
        "label page published"
    );
    Ok(outcome)
}
